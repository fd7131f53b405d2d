use contracts::system::auth::validate_new_password;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::system::auth::api;

/// Landing page of the emailed reset link (`/reset-password?token=...`)
#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let query = use_query_map();
    let reset_token = move || query.with(|q| q.get("token")).filter(|t| !t.is_empty());

    let (password, set_password) = signal(String::new());
    let (confirmation, set_confirmation) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (done_message, set_done_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error_message.set(None);

        let Some(token) = reset_token() else {
            set_error_message.set(Some("The reset link is missing its token.".to_string()));
            return;
        };
        let password_val = password.get();
        if let Err(e) = validate_new_password(&password_val, &confirmation.get()) {
            set_error_message.set(Some(e));
            return;
        }

        set_is_loading.set(true);
        spawn_local(async move {
            match api::reset_password(token, password_val).await {
                Ok(message) => {
                    let message = if message.is_empty() {
                        "Your password has been updated. You can now sign in.".to_string()
                    } else {
                        message
                    };
                    set_done_message.set(Some(message));
                }
                Err(e) => {
                    log::error!("Password reset failed: {}", e);
                    set_error_message.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>"Choose a new password"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <Show
                    when=move || done_message.get().is_some()
                    fallback=move || view! {
                        <form on:submit=on_submit>
                            <div class="form-group">
                                <label for="new-password">"New password"</label>
                                <input
                                    type="password"
                                    id="new-password"
                                    autocomplete="new-password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    required
                                    disabled=move || is_loading.get()
                                />
                            </div>
                            <div class="form-group">
                                <label for="confirm-password">"Confirm password"</label>
                                <input
                                    type="password"
                                    id="confirm-password"
                                    autocomplete="new-password"
                                    prop:value=move || confirmation.get()
                                    on:input=move |ev| set_confirmation.set(event_target_value(&ev))
                                    required
                                    disabled=move || is_loading.get()
                                />
                            </div>
                            <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                                {move || if is_loading.get() { "Saving..." } else { "Update password" }}
                            </button>
                        </form>
                    }
                >
                    <div class="success-message">{move || done_message.get().unwrap_or_default()}</div>
                </Show>

                <div class="login-info">
                    <A href="/">"Back to sign in"</A>
                </div>
            </div>
        </div>
    }
}
