use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires authentication
/// Shows fallback if not authenticated
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().token.is_some()
            fallback=|| view! { <div class="guard-message">"Not authenticated. Please log in."</div> }
        >
            {children()}
        </Show>
    }
}

/// Component that requires admin privileges
/// Shows fallback if not admin
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_admin()
            fallback=|| view! { <div class="guard-message">"Access denied. Admin privileges required."</div> }
        >
            {children()}
        </Show>
    }
}
