//! Request verbs.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The verbs the portal API accepts.
///
/// A request descriptor without an explicit verb is sent as `GET`.
///
/// ## Examples
///
/// ```rust
/// use api::RestMethod;
///
/// assert_eq!(RestMethod::default(), RestMethod::Get);
/// assert_eq!(RestMethod::Patch.as_str(), "PATCH");
///
/// let parsed: RestMethod = "DELETE".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Delete);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RestMethod {
    /// Wire name of the verb.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
