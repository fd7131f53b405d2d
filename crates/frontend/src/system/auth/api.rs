use contracts::system::auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, ResetPasswordRequest,
    UserInfo,
};
use gloo_net::http::{Request, Response};

use crate::shared::api_utils::{api_url, bearer};

/// Successful login: server-issued token plus the user it belongs to
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}

async fn server_message(response: &Response) -> Option<String> {
    response
        .json::<serde_json::Value>()
        .await
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<Session, String> {
    let request = LoginRequest { username, password };

    let response = Request::post(&api_url("/api/auth/login"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let detail = server_message(&response)
            .await
            .unwrap_or_else(|| response.status().to_string());
        return Err(format!("Login failed: {}", detail));
    }

    let body = response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    session_from_response(body)
}

fn session_from_response(body: LoginResponse) -> Result<Session, String> {
    if !body.success {
        return Err(body
            .message
            .unwrap_or_else(|| "Invalid username or password".to_string()));
    }
    match (body.token, body.user) {
        (Some(token), Some(user)) if !token.is_empty() => Ok(Session { token, user }),
        _ => Err("Login response did not contain a session".to_string()),
    }
}

/// Get current user info
pub async fn get_current_user(token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&api_url("/api/auth/me"))
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Get current user failed: {}", response.status()));
    }

    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Ask the server to mail a password reset link
pub async fn forgot_password(email: String) -> Result<String, String> {
    let request = ForgotPasswordRequest { email };
    post_for_message("/api/auth/forgot-password", &request).await
}

/// Set a new password using the token from the reset link
pub async fn reset_password(token: String, new_password: String) -> Result<String, String> {
    let request = ResetPasswordRequest {
        token,
        new_password,
    };
    post_for_message("/api/auth/reset-password", &request).await
}

async fn post_for_message<B: serde::Serialize>(path: &str, body: &B) -> Result<String, String> {
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let detail = server_message(&response)
            .await
            .unwrap_or_else(|| format!("Request failed: {}", response.status()));
        return Err(detail);
    }

    let body = response
        .json::<MessageResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    if body.success {
        Ok(body.message.unwrap_or_default())
    } else {
        Err(body
            .message
            .unwrap_or_else(|| "Request was rejected".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: "1".to_string(),
            username: "admin".to_string(),
            full_name: None,
            email: None,
            is_admin: true,
        }
    }

    #[test]
    fn test_session_requires_token_and_user() {
        let ok = session_from_response(LoginResponse {
            success: true,
            token: Some("signed".to_string()),
            user: Some(user()),
            message: None,
        })
        .unwrap();
        assert_eq!(ok.token, "signed");

        let missing = session_from_response(LoginResponse {
            success: true,
            token: None,
            user: Some(user()),
            message: None,
        });
        assert!(missing.is_err());
    }

    #[test]
    fn test_rejected_login_uses_server_message() {
        let err = session_from_response(LoginResponse {
            success: false,
            token: None,
            user: None,
            message: Some("Account locked".to_string()),
        })
        .unwrap_err();
        assert_eq!(err, "Account locked");
    }
}
