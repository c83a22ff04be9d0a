//! Wire types exchanged with the form backend

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A selectable `{id, name}` pair from the backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub name: String,
}

impl OptionItem {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Body of `GET /config`
///
/// Lists missing from the response deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigResponse {
    pub status_options: Vec<OptionItem>,
    pub building_options: Vec<OptionItem>,
    pub shelf_options: Vec<OptionItem>,
    pub tote_box_options: Vec<OptionItem>,
    pub checked_out_by_options: Vec<OptionItem>,
    pub condition_options: Vec<OptionItem>,
}

impl ConfigResponse {
    /// Parse a response body
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

/// Body of `POST /submit` (or its `json` part)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    pub task_id: String,
    pub action: String,
    pub status_option_id: Option<String>,
    pub building_option_id: Option<String>,
    pub shelf_option_id: Option<String>,
    pub tote_box_option_id: Option<String>,
    pub checked_out_by_option_id: Option<String>,
    pub condition_option_id: Option<String>,
    pub reason: String,
}

/// Photo attached to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Photo {
    /// Build a photo from raw bytes, guessing the content type from the file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Check that the file can be opened before anything is sent
    pub fn check_readable(path: &Path) -> std::io::Result<()> {
        let file = std::fs::File::open(path)?;
        if !file.metadata()?.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }
        Ok(())
    }

    /// Read a photo from disk, keeping its original file name
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "application/octet-stream",
    }
}

/// How a submission is encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Json,
    Photo,
}

impl SubmitMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Photo => "Photo",
        }
    }
}

/// A fully prepared submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    /// `application/json` body
    Json(SubmitPayload),
    /// `multipart/form-data` with `json` and `photo` parts
    Multipart {
        payload: SubmitPayload,
        photo: Photo,
    },
}

impl SubmitRequest {
    /// Photo presence decides the encoding
    pub fn new(payload: SubmitPayload, photo: Option<Photo>) -> Self {
        match photo {
            Some(photo) => Self::Multipart { payload, photo },
            None => Self::Json(payload),
        }
    }

    pub fn mode(&self) -> SubmitMode {
        match self {
            Self::Json(_) => SubmitMode::Json,
            Self::Multipart { .. } => SubmitMode::Photo,
        }
    }

    pub fn payload(&self) -> &SubmitPayload {
        match self {
            Self::Json(payload) | Self::Multipart { payload, .. } => payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload() -> SubmitPayload {
        SubmitPayload {
            task_id: "86a1b2".to_string(),
            action: "checkout".to_string(),
            status_option_id: Some("st-1".to_string()),
            building_option_id: None,
            shelf_option_id: None,
            tote_box_option_id: None,
            checked_out_by_option_id: Some("emp-7".to_string()),
            condition_option_id: None,
            reason: String::new(),
        }
    }

    #[test]
    fn test_config_parses_camel_case_lists() {
        let body = r#"{
            "statusOptions": [{"id": "s1", "name": "In"}, {"id": "s2", "name": "Out"}],
            "buildingOptions": [{"id": "b1", "name": "North"}],
            "shelfOptions": [],
            "toteBoxOptions": [{"id": "t1", "name": "T-01"}],
            "checkedOutByOptions": [{"id": "e1", "name": "Ana"}],
            "conditionOptions": [{"id": "c1", "name": "Good"}]
        }"#;
        let config = ConfigResponse::from_json(body).unwrap();
        assert_eq!(
            config.status_options,
            vec![OptionItem::new("s1", "In"), OptionItem::new("s2", "Out")]
        );
        assert_eq!(config.building_options.len(), 1);
        assert!(config.shelf_options.is_empty());
        assert_eq!(config.condition_options[0].name, "Good");
    }

    #[test]
    fn test_config_missing_lists_default_empty() {
        let config = ConfigResponse::from_json(r#"{"statusOptions": []}"#).unwrap();
        assert_eq!(config, ConfigResponse::default());
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(ConfigResponse::from_json("<html>502</html>").is_err());
    }

    #[test]
    fn test_payload_serializes_exact_field_set() {
        let value = serde_json::to_value(payload()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "action",
                "buildingOptionId",
                "checkedOutByOptionId",
                "conditionOptionId",
                "reason",
                "shelfOptionId",
                "statusOptionId",
                "taskId",
                "toteBoxOptionId",
            ]
        );
        assert!(object["buildingOptionId"].is_null());
        assert_eq!(object["statusOptionId"], "st-1");
        assert_eq!(object["reason"], "");
    }

    #[test]
    fn test_request_mode_follows_photo_presence() {
        let json = SubmitRequest::new(payload(), None);
        assert_eq!(json.mode(), SubmitMode::Json);

        let photo = Photo::new("shelf.JPG", vec![0xff, 0xd8]);
        let multipart = SubmitRequest::new(payload(), Some(photo));
        assert_eq!(multipart.mode(), SubmitMode::Photo);
        assert_eq!(multipart.payload().task_id, "86a1b2");
    }

    #[test]
    fn test_photo_content_type_guess() {
        assert_eq!(Photo::new("a.JPG", vec![]).content_type, "image/jpeg");
        assert_eq!(Photo::new("a.png", vec![]).content_type, "image/png");
        assert_eq!(
            Photo::new("noext", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_photo_read_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tote-17.jpg");
        std::fs::write(&path, b"jpeg-bytes").unwrap();

        let photo = Photo::read(&path).await.unwrap();
        assert_eq!(photo.file_name, "tote-17.jpg");
        assert_eq!(photo.bytes, b"jpeg-bytes".to_vec());
        assert_eq!(photo.content_type, "image/jpeg");
    }

    #[test]
    fn test_check_readable_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin-4.png");

        assert!(Photo::check_readable(&path).is_err());
        assert!(Photo::check_readable(dir.path()).is_err());

        std::fs::write(&path, b"png").unwrap();
        assert!(Photo::check_readable(&path).is_ok());
    }
}
