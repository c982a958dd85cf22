use api::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::client::SaferwallClient;
use crate::types::RegisterData;

/// Status reported for every rejected registration.
const FAIL_STATUS: u16 = 400;

/// Submitted registration form. Fields are absent when the input was not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Result of a form action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionOutcome {
    Success,
    /// The form is re-rendered with `data` describing what went wrong.
    Fail { status: u16, data: Value },
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Handles a registration form submission.
///
/// Empty or missing fields are reported as `{<field>: true, missing: true}`
/// without contacting the API. A rejection from the API is reported with the
/// error body it returned.
///
/// ## Errors
///
/// Transport failures and unreadable rejection bodies are returned as
/// [`ApiError`].
pub async fn register_action(
    client: &SaferwallClient,
    form: RegisterForm,
) -> Result<ActionOutcome, ApiError> {
    let mut missing = Map::new();
    let email = required(form.email, "email", &mut missing);
    let username = required(form.username, "username", &mut missing);
    let password = required(form.password, "password", &mut missing);

    let (Some(email), Some(username), Some(password)) = (email, username, password) else {
        debug!(fields = ?missing.keys().collect::<Vec<_>>(), "registration form incomplete");
        missing.insert("missing".to_string(), Value::Bool(true));
        return Ok(ActionOutcome::Fail {
            status: FAIL_STATUS,
            data: Value::Object(missing),
        });
    };

    let data = RegisterData {
        email,
        username,
        password,
    };
    match client.sign_up(&data).await {
        Ok(_) => {
            info!(username = %data.username, "account registered");
            Ok(ActionOutcome::Success)
        }
        Err(ApiError::Response(response)) => {
            debug!(status = response.status_code(), "registration rejected");
            Ok(ActionOutcome::Fail {
                status: FAIL_STATUS,
                data: response.json()?,
            })
        }
        Err(err) => Err(err),
    }
}

fn required(value: Option<String>, field: &str, missing: &mut Map<String, Value>) -> Option<String> {
    match value {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            missing.insert(field.to_string(), Value::Bool(true));
            None
        }
    }
}
