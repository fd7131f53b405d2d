use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::system::auth::api;

const DEFAULT_SENT_MESSAGE: &str =
    "If the address belongs to an account, a reset link has been sent.";

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (result, set_result) = signal(Option::<Result<String, String>>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get().trim().to_string();
        set_is_loading.set(true);
        set_result.set(None);

        spawn_local(async move {
            let outcome = api::forgot_password(email_val).await.map(|message| {
                if message.is_empty() {
                    DEFAULT_SENT_MESSAGE.to_string()
                } else {
                    message
                }
            });
            if let Err(e) = &outcome {
                log::error!("Password reset request failed: {}", e);
            }
            set_result.set(Some(outcome));
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>"Reset password"</h2>

                {move || result.get().map(|r| match r {
                    Ok(message) => view! { <div class="success-message">{message}</div> }.into_any(),
                    Err(message) => view! { <div class="error-message">{message}</div> }.into_any(),
                })}

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            autocomplete="email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Sending..." } else { "Send reset link" }}
                    </button>
                </form>

                <div class="login-info">
                    <A href="/">"Back to sign in"</A>
                </div>
            </div>
        </div>
    }
}
