use facegate_types::FlowMode;
use thiserror::Error;

use crate::FlowAction;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("cannot {action} while {mode}")]
    InvalidTransition { action: FlowAction, mode: FlowMode },

    #[error("identifier cannot be edited while {0}")]
    IdentifierLocked(FlowMode),
}
