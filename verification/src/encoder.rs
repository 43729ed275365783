//! Evidence encoder: builds the multipart body sent to the login endpoint.

use facegate_types::image::JPEG_MIME;
use facegate_types::{Evidence, Identifier, ImageBytes};
use reqwest::multipart::{Form, Part};

use crate::EncodeError;

/// Multipart field carrying the JPEG frame.
pub const IMAGE_FIELD: &str = "image";
/// Multipart field carrying the identifier.
pub const IDENTIFIER_FIELD: &str = "rollnumber";
/// File name attached to the image part. The service ignores it.
pub const IMAGE_FILE_NAME: &str = "captured_image.jpg";

/// A ready-to-send verification request body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvidencePayload {
    identifier: Identifier,
    image: ImageBytes,
}

impl EvidencePayload {
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn image(&self) -> &ImageBytes {
        &self.image
    }

    /// Convert into the two-part multipart form: `image` then `rollnumber`.
    pub fn into_form(self) -> Result<Form, EncodeError> {
        let image = Part::bytes(self.image.into_vec())
            .file_name(IMAGE_FILE_NAME)
            .mime_str(JPEG_MIME)
            .map_err(|e| EncodeError::Multipart(e.to_string()))?;
        Ok(Form::new()
            .part(IMAGE_FIELD, image)
            .text(IDENTIFIER_FIELD, self.identifier.into_string()))
    }
}

impl TryFrom<Evidence> for EvidencePayload {
    type Error = EncodeError;

    /// Only a camera frame can be submitted; decoded codes merely fill in the identifier.
    fn try_from(evidence: Evidence) -> Result<Self, Self::Error> {
        match evidence {
            Evidence::Frame { identifier, image } => encode(&identifier, Some(image)),
            Evidence::Code { .. } => Err(EncodeError::MissingImage),
        }
    }
}

/// Pair the current identifier with a captured frame.
///
/// Fails only when there is no frame. The identifier is not validated; an
/// empty one is encoded as an empty text part.
pub fn encode(identifier: &Identifier, image: Option<ImageBytes>) -> Result<EvidencePayload, EncodeError> {
    let image = image.ok_or(EncodeError::MissingImage)?;
    Ok(EvidencePayload {
        identifier: identifier.clone(),
        image,
    })
}
