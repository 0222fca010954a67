// crates/sparkwell-flows/src/avatar.rs
// ============================================================================
// Module: Sparkwell Emotion Avatar
// Description: Image generation from an emotional-state description.
// Purpose: Return the generated avatar as a verified image data URI.
// Dependencies: crate::error, sparkwell-core, sparkwell-media
// ============================================================================

//! ## Overview
//! The avatar flow frames the user's description as an image instruction,
//! calls [`GenerationGateway::generate_image`], and packages the bytes with
//! [`DataUri::pack_verified`], so a backend that mislabels its output cannot
//! produce a URI whose mime contradicts the payload.

use sparkwell_core::GenerationGateway;
use sparkwell_media::DataUri;

use crate::error::FlowError;

/// Builds the image instruction for an emotional-state description.
#[must_use]
pub fn avatar_instruction(description: &str) -> String {
    format!(
        "Generate an avatar that visually represents the feelings in the following description \
         of the user's emotional state. The avatar should be a square image.\n\nEmotional state \
         description: {description}"
    )
}

/// Generates an avatar image and packages it as a data URI.
///
/// # Errors
///
/// Returns [`FlowError::EmptyInput`] for a blank description,
/// [`FlowError::Image`] when the gateway fails, [`FlowError::NoImage`] for an
/// empty payload, and [`FlowError::Packaging`] when the declared mime is
/// invalid or contradicts the image bytes.
pub async fn generate_avatar(
    gateway: &dyn GenerationGateway,
    description: &str,
) -> Result<DataUri, FlowError> {
    if description.trim().is_empty() {
        return Err(FlowError::EmptyInput { field: "description" });
    }
    let image =
        gateway.generate_image(&avatar_instruction(description)).await.map_err(FlowError::Image)?;
    if image.bytes.is_empty() {
        return Err(FlowError::NoImage);
    }
    Ok(DataUri::pack_verified(image.bytes, &image.mime_type)?)
}
