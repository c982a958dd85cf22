use api::{ApiError, RequestInit, RestMethod};
use serde_json::Value;

use super::SaferwallClient;
use crate::types::{ChangePasswordData, EmailData, LoginData, Session};

impl SaferwallClient {
    /// Logs in and returns the new session.
    pub async fn sign_in(&self, data: &LoginData) -> Result<Session, ApiError> {
        let init = RequestInit::new().method(RestMethod::Post).json(data)?;
        self.request("auth/login", false, init).await
    }

    /// Sends the account confirmation email again.
    pub async fn send_confirmation(&self, email: &str) -> Result<Value, ApiError> {
        self.post_email("auth/resend-confirmation", email).await
    }

    /// Requests a password reset email.
    pub async fn reset_password(&self, email: &str) -> Result<Value, ApiError> {
        self.post_email("auth/reset-password", email).await
    }

    /// Sets a new password using a reset token.
    pub async fn change_password(&self, data: &ChangePasswordData) -> Result<Value, ApiError> {
        let init = RequestInit::new().method(RestMethod::Post).json(data)?;
        self.request("auth/password", false, init).await
    }

    /// Ends the current session.
    pub async fn log_out(&self) -> Result<Value, ApiError> {
        self.request(
            "auth/logout",
            false,
            RequestInit::new().method(RestMethod::Delete),
        )
        .await
    }

    async fn post_email(&self, endpoint: &str, email: &str) -> Result<Value, ApiError> {
        let body = EmailData {
            email: email.to_string(),
        };
        let init = RequestInit::new().method(RestMethod::Post).json(&body)?;
        self.request(endpoint, false, init).await
    }
}
