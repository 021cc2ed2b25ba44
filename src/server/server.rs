//! # Server Core - Steganography Service
//!
//! The core server component is responsible for ONE thing: running uploads
//! through the LSB codec. It validates the upload, stages it on disk, calls the
//! encoder or decoder, and hands back the result.
//!
//! HTTP concerns (multipart parsing, routing, response headers) live in
//! [`routes`](super::routes).

use log::{error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::error::ApiError;
use super::upload::{secure_filename, UploadStore};
use crate::processing::{decoder, encoder, image_io, Payload, StegoError};

/// An image file received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Filename as sent by the client
    pub filename: String,
    pub data: Vec<u8>,
}

/// Result of a successful encode.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Suggested download name, always `encoded_<stem>.png`
    pub filename: String,
    /// PNG bytes
    pub png: Vec<u8>,
}

/// Core server component that performs encode and decode tasks.
pub struct ServerCore {
    uploads: Arc<UploadStore>,
}

impl ServerCore {
    pub fn new(uploads: UploadStore) -> Self {
        Self {
            uploads: Arc::new(uploads),
        }
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    fn check_filename(&self, upload: &Upload) -> Result<(), ApiError> {
        if upload.filename.is_empty() || !self.uploads.is_allowed(&upload.filename) {
            return Err(ApiError::InvalidFile);
        }
        Ok(())
    }

    /// Hide `message` in the uploaded image and return it as PNG.
    ///
    /// # Errors
    /// - [`ApiError::InvalidFile`]: empty filename or extension not allowed
    /// - [`ApiError::Payload`]: message cannot be represented one byte per character
    /// - [`ApiError::EncodingFailed`]: image could not be read or written
    pub async fn encode_upload(
        &self,
        request_id: Uuid,
        upload: Upload,
        message: String,
    ) -> Result<EncodedImage, ApiError> {
        self.check_filename(&upload)?;
        let payload = Payload::from_text(&message).map_err(ApiError::Payload)?;

        let safe_name = secure_filename(&upload.filename);
        info!(
            "📷 [{}] Encoding {} chars into '{}' ({} bytes)",
            request_id,
            payload.len(),
            safe_name,
            upload.data.len()
        );

        // Decoding and scanning pixels is CPU-bound, keep it off the async runtime
        let uploads = Arc::clone(&self.uploads);
        let result = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, StegoError> {
            let staged = uploads.stage(&upload.filename, &upload.data)?;
            let grid = image_io::load_grid_from_path(staged.path())?;

            if payload.bitstream_len() > grid.capacity_bits() {
                warn!(
                    "[{}] Message needs {} bits but the image holds {}; it will be truncated",
                    request_id,
                    payload.bitstream_len(),
                    grid.capacity_bits()
                );
            }

            let grid = encoder::encode(grid, &payload);

            let output = uploads.reserve("png")?;
            image_io::save_grid_to_path(&grid, output.path())?;
            Ok(output.read()?)
        })
        .await;

        let png = match result {
            Ok(Ok(png)) => png,
            Ok(Err(e)) => {
                error!("❌ [{}] Encoding error: {}", request_id, e);
                return Err(ApiError::EncodingFailed);
            }
            Err(e) => {
                error!("❌ [{}] Encoding task panicked: {}", request_id, e);
                return Err(ApiError::EncodingFailed);
            }
        };

        info!("✅ [{}] Encoded image ready ({} bytes)", request_id, png.len());

        Ok(EncodedImage {
            filename: encoded_filename(&safe_name),
            png,
        })
    }

    /// Extract the hidden message from the uploaded image.
    ///
    /// # Errors
    /// - [`ApiError::InvalidFile`]: empty filename or extension not allowed
    /// - [`ApiError::DecodingFailed`]: image could not be read
    pub async fn decode_upload(&self, request_id: Uuid, upload: Upload) -> Result<String, ApiError> {
        self.check_filename(&upload)?;

        info!(
            "🔍 [{}] Decoding '{}' ({} bytes)",
            request_id,
            secure_filename(&upload.filename),
            upload.data.len()
        );

        let uploads = Arc::clone(&self.uploads);
        let result = tokio::task::spawn_blocking(move || -> Result<String, StegoError> {
            let staged = uploads.stage(&upload.filename, &upload.data)?;
            let grid = image_io::load_grid_from_path(staged.path())?;
            Ok(decoder::decode_text(&grid))
        })
        .await;

        match result {
            Ok(Ok(message)) => {
                info!("✅ [{}] Decoded {} chars", request_id, message.chars().count());
                Ok(message)
            }
            Ok(Err(e)) => {
                error!("❌ [{}] Decoding error: {}", request_id, e);
                Err(ApiError::DecodingFailed)
            }
            Err(e) => {
                error!("❌ [{}] Decoding task panicked: {}", request_id, e);
                Err(ApiError::DecodingFailed)
            }
        }
    }
}

/// `encoded_<stem>.png` for a sanitized upload name.
fn encoded_filename(safe_name: &str) -> String {
    let stem = match safe_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ if !safe_name.is_empty() => safe_name,
        _ => "image",
    };
    format!("encoded_{stem}.png")
}
