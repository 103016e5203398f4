use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::Config;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Pushes a poster image to the configured image host and returns the
/// hosted URL. Provider error bodies are logged, never returned to the
/// client.
pub async fn upload_poster(
    http: &reqwest::Client,
    config: &Config,
    file_name: String,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<String, AppError> {
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(content_type)
        .map_err(|_| AppError::ValidationError("image content type is invalid".to_string()))?;

    let response = http
        .post(&config.image_host_upload_url)
        .bearer_auth(&config.image_host_api_key)
        .multipart(Form::new().part("file", part))
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Image host unreachable");
            AppError::ExternalServiceError("Failed to upload image".to_string())
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(%status, body = %body, "Image host rejected upload");
        return Err(AppError::ExternalServiceError(
            "Failed to upload image".to_string(),
        ));
    }

    let uploaded: UploadResponse = response.json().await.map_err(|e| {
        tracing::error!(error = %e, "Image host returned an unexpected payload");
        AppError::ExternalServiceError("Failed to upload image".to_string())
    })?;

    Ok(uploaded.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_parses_the_hosted_url() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"url": "https://img.example.com/abc.png", "size": 123}"#)
                .unwrap();
        assert_eq!(parsed.url, "https://img.example.com/abc.png");
    }

    #[test]
    fn part_rejects_a_malformed_content_type() {
        assert!(Part::bytes(vec![1, 2, 3]).mime_str("not a mime").is_err());
    }
}
