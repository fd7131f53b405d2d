use leptos::prelude::*;

use crate::system::auth::context::{do_logout, use_auth};

#[component]
pub fn Header() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    let display_name = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.full_name.unwrap_or(u.username))
            .unwrap_or_default()
    };

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <span class="header__title">"MEAMS"</span>
            </div>
            <div class="header__actions">
                <span class="header__user">{display_name}</span>
                <button class="button button--ghost" on:click=move |_| do_logout(set_auth_state)>
                    "Sign out"
                </button>
            </div>
        </header>
    }
}
