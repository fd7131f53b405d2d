use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Startup session check finished
    pub is_restored: bool,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.token.is_some()
            && self
                .user_info
                .as_ref()
                .map(|u| u.is_admin)
                .unwrap_or(false)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Restore session from localStorage on mount
    Effect::new(move |_| {
        spawn_local(async move {
            let Some(token) = storage::get_token() else {
                set_auth_state.set(AuthState {
                    is_restored: true,
                    ..Default::default()
                });
                return;
            };

            match api::get_current_user(&token).await {
                Ok(user_info) => {
                    set_auth_state.set(AuthState {
                        token: Some(token),
                        user_info: Some(user_info),
                        is_restored: true,
                    });
                }
                Err(e) => {
                    log::warn!("Stored session is no longer valid: {}", e);
                    storage::clear_token();
                    set_auth_state.set(AuthState {
                        is_restored: true,
                        ..Default::default()
                    });
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Store a server-issued session and publish it to the app
pub fn apply_session(set_auth_state: WriteSignal<AuthState>, session: api::Session) {
    storage::save_token(&session.token);
    set_auth_state.set(AuthState {
        token: Some(session.token),
        user_info: Some(session.user),
        is_restored: true,
    });
}

/// Logout is client-side only: drop the token and the user
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_token();
    set_auth_state.set(AuthState {
        is_restored: true,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_requires_token() {
        let user = UserInfo {
            id: "1".to_string(),
            username: "admin".to_string(),
            full_name: None,
            email: None,
            is_admin: true,
        };
        let without_token = AuthState {
            token: None,
            user_info: Some(user.clone()),
            is_restored: true,
        };
        assert!(!without_token.is_admin());

        let with_token = AuthState {
            token: Some("t".to_string()),
            user_info: Some(user),
            is_restored: true,
        };
        assert!(with_token.is_admin());
    }
}
