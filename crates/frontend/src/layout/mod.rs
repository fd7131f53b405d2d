pub mod header;

use header::header::Header;
use leptos::prelude::*;

/// Application shell: top header above the page content
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Header />
            <main class="app-layout__content">{children()}</main>
        </div>
    }
}
