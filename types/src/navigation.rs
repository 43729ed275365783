//! Navigation handoff between views.

use crate::Identifier;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Route of the administrator view.
pub const ADMIN_ROUTE: &str = "/home";
/// Route of the general user view.
pub const USER_ROUTE: &str = "/user";

/// Where a successful verification sends the user, with the state it hands over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Destination {
    /// Administrator view, carrying `{ "admin": <identifier> }`.
    Admin { admin: String },
    /// General user view, carrying `{ "result": <full response payload> }`.
    User { result: Value },
}

impl Destination {
    pub fn route(&self) -> &'static str {
        match self {
            Self::Admin { .. } => ADMIN_ROUTE,
            Self::User { .. } => USER_ROUTE,
        }
    }

    /// The navigation state handed to the next view.
    pub fn handoff(&self) -> Value {
        match self {
            Self::Admin { admin } => json!({ "admin": admin }),
            Self::User { result } => json!({ "result": result }),
        }
    }
}

/// Inbound state from whichever view navigated to the login flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    #[serde(default)]
    pub rollnumber: Option<String>,
}

impl NavigationContext {
    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        Self {
            rollnumber: Some(identifier.into()),
        }
    }

    /// The identifier to pre-fill, if the previous view supplied one.
    pub fn prefill(&self) -> Option<Identifier> {
        self.rollnumber.as_deref().map(Identifier::from)
    }
}
