use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::logs::ui::list::LogsPage;
use crate::system::pages::forgot_password::ForgotPasswordPage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::reset_password::ResetPasswordPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Shell>
            <LogsPage />
        </Shell>
    }
}

/// Signed-in users get the main layout, everyone else the login form
#[component]
fn Home() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_restored
            fallback=|| view! { <div class="app-loading">"Loading..."</div> }
        >
            <Show
                when=move || auth_state.get().token.is_some()
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="not-found">"Page not found."</div> }>
                <Route path=path!("/") view=Home />
                <Route path=path!("/logs") view=Home />
                <Route path=path!("/forgot-password") view=ForgotPasswordPage />
                <Route path=path!("/reset-password") view=ResetPasswordPage />
            </Routes>
        </Router>
    }
}
