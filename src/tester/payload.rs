//! Request bodies sent to the API
//!
//! Field names follow the API's camelCase JSON convention.

use serde::Serialize;

/// 1x1 pixel PNG, base64 encoded
pub const TEST_IMAGE: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub const TEST_FILENAME: &str = "test-image.png";

pub const TEST_PROMPT: &str = "A person walking in a park";

/// Body of `POST /upload-image`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest<'a> {
    pub image_data: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<&'a str>,
}

impl<'a> UploadImageRequest<'a> {
    pub fn new(image_data: &'a str) -> Self {
        Self {
            image_data,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }
}

/// Body of `POST /generate-images`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesRequest<'a> {
    pub image: &'a str,
    pub prompt: &'a str,
    pub num_images: u32,
}

/// Body of `POST /generate-video`
#[derive(Clone, Debug, Serialize)]
pub struct GenerateVideoRequest<'a> {
    pub image: &'a str,
    pub prompt: &'a str,
    pub duration: u32,
}
