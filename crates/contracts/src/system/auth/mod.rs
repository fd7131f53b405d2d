use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token is issued by the server; the client only stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Generic `{ success, message }` envelope used by the password endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate the new password pair entered on the reset form
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters long.",
            MIN_PASSWORD_LEN
        ));
    }
    if password != confirmation {
        return Err("Passwords do not match.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_without_token() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"success": false, "message": "Invalid credentials"}"#)
                .unwrap();
        assert!(!resp.success);
        assert!(resp.token.is_none());
        assert_eq!(resp.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_user_info_defaults_admin_flag() {
        let user: UserInfo = serde_json::from_str(r#"{"id": "1", "username": "clerk"}"#).unwrap();
        assert!(!user.is_admin);
    }

    #[test]
    fn test_validate_new_password() {
        assert!(validate_new_password("short", "short").is_err());
        assert_eq!(
            validate_new_password("longenough", "longenougH"),
            Err("Passwords do not match.".to_string())
        );
        assert!(validate_new_password("longenough", "longenough").is_ok());
    }
}
