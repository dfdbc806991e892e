use serde::{Deserialize, Serialize};

use crate::users::model::PublicUser;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
    pub token: String,
}

/// Plain message envelope for logout, me and status.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_serialization() {
        let response = LoginResponse {
            message: "login successful".into(),
            user: PublicUser {
                id: 1,
                username: "alice".into(),
                email: "alice@x.com".into(),
            },
            token: "simple_token_1_1700000000000".into(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("alice@x.com"));
        assert!(json.contains("simple_token_1_"));
        assert!(!json.contains("password"));
    }
}
