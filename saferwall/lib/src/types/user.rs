//! Users, sessions and activity feed entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A signed-in session.
///
/// Produced by login and signup; the portal keeps it in its own session
/// store and hands it back when constructing a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Creates a session carrying only a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Returns the token, treating an empty string as absent.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

/// A public user profile.
///
/// Counters and timestamps are kept as raw JSON; unknown keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Unix timestamp of account creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_since: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following_count: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_count: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions_count: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<Value>,
    /// Whether the signed-in user follows this profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followed: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry of the recent activity feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<ActivityAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
    /// Unix timestamp of the activity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The user who performed an activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_since: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_token() {
        assert_eq!(Session::with_token("abc").token(), Some("abc"));
        assert_eq!(Session::with_token("").token(), None);
        assert_eq!(Session::default().token(), None);
    }

    #[test]
    fn test_session_keeps_unknown_fields() {
        let session: Session = serde_json::from_value(json!({
            "token": "abc",
            "expires_in": 3600
        }))
        .unwrap();

        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.extra["expires_in"], 3600);
    }

    #[test]
    fn test_activity_type_field() {
        let activity: Activity = serde_json::from_value(json!({
            "type": "like",
            "author": { "username": "alice" },
            "target": { "sha256": "abc" }
        }))
        .unwrap();

        assert_eq!(activity.kind.as_deref(), Some("like"));
        assert_eq!(
            activity.author.and_then(|a| a.username).as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn test_user_and_activity_round_trip() {
        let user = json!({
            "username": "alice",
            "member_since": "2021-03-04",
            "followers_count": 7,
            "has_avatar": true,
            "social": { "github": "alice" }
        });
        let decoded: User = serde_json::from_value(user.clone()).unwrap();
        assert_eq!(decoded.extra["social"]["github"], "alice");
        assert_eq!(serde_json::to_value(&decoded).unwrap(), user);

        let activity = json!({
            "id": 42,
            "type": "comment",
            "author": { "username": "bob", "avatar": "bob.png" },
            "comment": "packed with upx"
        });
        let decoded: Activity = serde_json::from_value(activity.clone()).unwrap();
        assert_eq!(decoded.extra["comment"], "packed with upx");
        assert_eq!(serde_json::to_value(&decoded).unwrap(), activity);
    }
}
