//! Captured evidence submitted for verification.

use crate::{Identifier, ImageBytes};

/// The artifact produced by one of the two capture modalities.
///
/// Evidence is ephemeral: it is built per attempt and never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evidence {
    /// A still frame from the camera, paired with the identifier typed at capture time.
    Frame {
        identifier: Identifier,
        image: ImageBytes,
    },
    /// Raw text decoded from a machine-readable code.
    Code { raw: String },
}

impl Evidence {
    /// The identifier this evidence names.
    ///
    /// For a decoded code this is the first comma-delimited segment; the rest
    /// of the decoded text is discarded.
    pub fn identifier(&self) -> Identifier {
        match self {
            Self::Frame { identifier, .. } => identifier.clone(),
            Self::Code { raw } => Identifier::new(raw.split(',').next().unwrap_or_default()),
        }
    }
}
