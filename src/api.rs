//! Requests to the conversion backend.

use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use web_sys::{File, FormData};

use crate::error::AppError;
use crate::model::ConversionSettings;
use crate::state::Session;

pub const MAX_UPLOAD_BYTES: f64 = 10.0 * 1024.0 * 1024.0;
const ACCEPTED_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub download_url: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reject what the backend would refuse anyway, before spending the upload.
pub fn check_upload(mime: &str, size: f64) -> Result<(), AppError> {
    if !ACCEPTED_TYPES.contains(&mime) {
        return Err(AppError::InvalidSetting {
            field: "file",
            value: format!("unsupported type {:?}, use PNG or JPEG", mime),
        });
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::InvalidSetting {
            field: "file",
            value: "larger than 10MB".into(),
        });
    }
    Ok(())
}

/// `/download/name.dst` → `/preview/name`.
pub fn preview_path(download_url: &str) -> Option<String> {
    let last = download_url.rsplit('/').next()?;
    let stem = last.split('.').next()?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("/preview/{}", stem))
}

async fn error_for(resp: Response) -> AppError {
    let status = resp.status();
    let message = match resp.text().await {
        Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or(body),
        Err(_) => resp.status_text(),
    };
    AppError::Http { status, message }
}

pub async fn upload(
    session: &Session,
    file: &File,
    settings: &ConversionSettings,
) -> Result<UploadResponse, AppError> {
    session.require_user()?;
    settings.validate()?;
    check_upload(&file.type_(), file.size())?;

    let form = FormData::new()?;
    form.append_with_blob("file", file)?;
    form.append_with_str("client_id", &session.client_id)?;
    for (name, value) in settings.form_fields() {
        form.append_with_str(name, &value)?;
    }

    log::info!("uploading {} ({} bytes)", file.name(), file.size());
    let resp = Request::post(&session.url("/upload/")).body(form)?.send().await?;
    if !resp.ok() {
        return Err(error_for(resp).await);
    }
    Ok(resp.json::<UploadResponse>().await?)
}

pub async fn fetch_preview(session: &Session, download_url: &str) -> Result<String, AppError> {
    let path = preview_path(download_url)
        .ok_or_else(|| AppError::Decode(format!("no file name in {:?}", download_url)))?;
    let resp = Request::get(&session.url(&path)).send().await?;
    if !resp.ok() {
        return Err(error_for(resp).await);
    }
    Ok(resp.text().await?)
}

pub fn download_href(session: &Session, download_url: &str) -> String {
    session.url(download_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_path_strips_extension() {
        assert_eq!(
            preview_path("/download/cat_1a2b.dst").as_deref(),
            Some("/preview/cat_1a2b")
        );
        assert_eq!(preview_path("plain").as_deref(), Some("/preview/plain"));
        assert_eq!(preview_path("/download/"), None);
    }

    #[test]
    fn upload_check_matches_backend_limits() {
        assert!(check_upload("image/png", 1024.0).is_ok());
        assert!(check_upload("image/jpeg", MAX_UPLOAD_BYTES).is_ok());
        assert!(check_upload("image/gif", 10.0).is_err());
        assert!(check_upload("image/png", MAX_UPLOAD_BYTES + 1.0).is_err());
    }

    #[test]
    fn upload_response_tolerates_missing_fields() {
        let r: UploadResponse = serde_json::from_str(r#"{"download_url":"/download/a.dst"}"#).unwrap();
        assert_eq!(r.download_url, "/download/a.dst");
        assert_eq!(r.filename, None);
    }
}
