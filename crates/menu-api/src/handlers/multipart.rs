//! Collects a multipart body into text fields and file uploads.

use std::collections::HashMap;

use axum::extract::Multipart;
use menu_core::ports::AssetUpload;

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, AssetUpload>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                    form.files.insert(
                        name,
                        AssetUpload::new(&file_name, content_type.as_deref(), bytes.to_vec()),
                    );
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Invalid field {}: {}", name, e)))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Removes the upload under `name`; empty file inputs count as absent.
    pub fn take_file(&mut self, name: &str) -> Option<AssetUpload> {
        self.files.remove(name).filter(|upload| !upload.is_empty())
    }
}
