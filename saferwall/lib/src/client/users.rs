use api::{ApiError, RequestInit, RestMethod};
use serde_json::Value;

use super::SaferwallClient;
use crate::types::{
    Activity, RegisterData, Session, UpdateEmailData, UpdatePasswordData, UpdateProfileData, User,
};

/// Page size of the activity feed.
const ACTIVITIES_PER_PAGE: u32 = 10;

impl SaferwallClient {
    /// Returns the most recent activities across the portal.
    pub async fn get_activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.request(
            &format!("users/activities?per_page={ACTIVITIES_PER_PAGE}"),
            false,
            RequestInit::new(),
        )
        .await
    }

    /// Returns a user profile. Cacheable.
    pub async fn get_user(&self, username: &str) -> Result<User, ApiError> {
        self.request(&format!("users/{username}"), true, RequestInit::new())
            .await
    }

    /// Follows a user, or unfollows when `follow` is `false`.
    pub async fn follow_user(&self, username: &str, follow: bool) -> Result<Value, ApiError> {
        let action = if follow { "follow" } else { "unfollow" };
        self.request(
            &format!("users/{username}/{action}"),
            false,
            RequestInit::new().method(RestMethod::Post),
        )
        .await
    }

    /// Creates an account.
    pub async fn sign_up(&self, data: &RegisterData) -> Result<Session, ApiError> {
        let init = RequestInit::new().method(RestMethod::Post).json(data)?;
        self.request("users/", false, init).await
    }

    /// Updates the public profile of `data.username`.
    pub async fn update_profile(&self, data: &UpdateProfileData) -> Result<Value, ApiError> {
        let init = RequestInit::new().method(RestMethod::Patch).json(data)?;
        self.request(&format!("users/{}", data.username), false, init)
            .await
    }

    /// Changes the email address of `data.username`.
    pub async fn update_email(&self, data: &UpdateEmailData) -> Result<Value, ApiError> {
        let init = RequestInit::new().method(RestMethod::Patch).json(data)?;
        self.request(&format!("users/{}/email", data.username), false, init)
            .await
    }

    /// Changes the password of `data.username`.
    pub async fn update_password(&self, data: &UpdatePasswordData) -> Result<Value, ApiError> {
        let init = RequestInit::new().method(RestMethod::Patch).json(data)?;
        self.request(&format!("users/{}/password", data.username), false, init)
            .await
    }

    /// Deletes an account.
    pub async fn delete_account(&self, username: &str) -> Result<Value, ApiError> {
        self.request(
            &format!("users/{username}"),
            false,
            RequestInit::new().method(RestMethod::Delete),
        )
        .await
    }
}
