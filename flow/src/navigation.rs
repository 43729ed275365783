//! Session/navigation controller.

use facegate_session::SessionStore;
use facegate_types::{Destination, Identifier, VerificationResult};

use crate::AuthFailure;

/// Receives the destination of a successful login.
pub trait Navigator {
    fn navigate(&mut self, destination: &Destination);
}

/// What to do after a verification completes.
#[derive(Clone, Debug, PartialEq)]
pub enum Routing {
    /// The session was written; leave the flow for this view.
    Navigate(Destination),
    /// Stay in the flow and show the failure.
    Stay(AuthFailure),
}

/// Writes the session on recognition and picks the destination view.
pub struct SessionController<S> {
    store: S,
    admin_identifier: Identifier,
}

impl<S: SessionStore> SessionController<S> {
    pub fn new(store: S, admin_identifier: impl Into<Identifier>) -> Self {
        Self {
            store,
            admin_identifier: admin_identifier.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn admin_identifier(&self) -> &Identifier {
        &self.admin_identifier
    }

    /// Session state is touched only for a recognized subject.
    pub fn route(&self, result: &VerificationResult) -> Routing {
        let (subject_name, payload) = match result {
            VerificationResult::Recognized {
                subject_name,
                payload,
            } => (subject_name, payload),
            other => {
                return match AuthFailure::from_result(other) {
                    Some(failure) => Routing::Stay(failure),
                    None => Routing::Stay(AuthFailure::Unrecognized),
                };
            }
        };

        if let Err(e) = self.store.set(subject_name) {
            tracing::warn!(subject = %subject_name, "failed to persist session: {e}");
            return Routing::Stay(AuthFailure::SessionUnavailable {
                detail: e.to_string(),
            });
        }

        let destination = if self.admin_identifier == subject_name.as_str() {
            Destination::Admin {
                admin: subject_name.clone(),
            }
        } else {
            Destination::User {
                result: payload.clone(),
            }
        };
        tracing::info!(subject = %subject_name, route = destination.route(), "subject authenticated");
        Routing::Navigate(destination)
    }
}
