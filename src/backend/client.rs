//! HTTP client for communicating with the form backend
//!
//! Both endpoints read the response body as text before looking at the
//! status, so error bodies reach the worker verbatim.

use super::error::{FormError, FormResult};
use super::normalize::endpoint;
use super::traits::BackendApi;
use crate::state::{ConfigResponse, Photo, SubmitPayload, SubmitRequest};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

/// Part name carrying the payload in photo submissions
const JSON_PART: &str = "json";
/// Part name carrying the photo bytes
const PHOTO_PART: &str = "photo";
/// Browsers send Blob parts with this file name; backends may read the part as a file
const JSON_PART_FILE_NAME: &str = "blob";

/// reqwest-backed client
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    client: reqwest::Client,
}

impl HttpBackendClient {
    /// Create a new client
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("scanform/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn build_multipart(payload: &SubmitPayload, photo: Photo) -> reqwest::Result<Form> {
        // Serializing a struct of strings cannot fail
        let json = serde_json::to_vec(payload).unwrap_or_default();
        let json_part = Part::bytes(json)
            .file_name(JSON_PART_FILE_NAME)
            .mime_str("application/json")?;
        let photo_part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(&photo.content_type)?;

        Ok(Form::new()
            .part(JSON_PART, json_part)
            .part(PHOTO_PART, photo_part))
    }
}

#[async_trait]
impl BackendApi for HttpBackendClient {
    async fn fetch_config(&self, backend: &str) -> FormResult<ConfigResponse> {
        let url = endpoint(backend, "config");
        tracing::debug!("GET {url}");

        let fetch_failed = |e: reqwest::Error| FormError::ConfigFetch {
            reason: e.to_string(),
        };
        let response = self.client.get(&url).send().await.map_err(fetch_failed)?;
        let status = response.status();
        let body = response.text().await.map_err(fetch_failed)?;

        if !status.is_success() {
            return Err(FormError::ConfigHttp {
                status: status.as_u16(),
                body,
            });
        }

        ConfigResponse::from_json(&body).map_err(|e| FormError::ConfigFetch {
            reason: format!("invalid config JSON: {e}"),
        })
    }

    async fn submit(&self, backend: &str, request: SubmitRequest) -> FormResult<String> {
        let url = endpoint(backend, "submit");
        let network_failed = |e: reqwest::Error| FormError::SubmitNetwork {
            reason: e.to_string(),
        };

        tracing::debug!(
            "POST {url} ({}) task={}",
            request.mode().label(),
            request.payload().task_id
        );

        let builder = match request {
            SubmitRequest::Json(payload) => self.client.post(&url).json(&payload),
            SubmitRequest::Multipart { payload, photo } => {
                let form = Self::build_multipart(&payload, photo).map_err(network_failed)?;
                self.client.post(&url).multipart(form)
            }
        };

        let response = builder.send().await.map_err(network_failed)?;
        let status = response.status();
        let body = response.text().await.map_err(network_failed)?;

        if !status.is_success() {
            return Err(FormError::SubmitHttp {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OptionItem;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> SubmitPayload {
        SubmitPayload {
            task_id: "86a1b2".to_string(),
            action: "checkout".to_string(),
            status_option_id: Some("st-out".to_string()),
            building_option_id: None,
            shelf_option_id: None,
            tote_box_option_id: Some("t-1".to_string()),
            checked_out_by_option_id: None,
            condition_option_id: None,
            reason: "restock".to_string(),
        }
    }

    /// A local address nothing listens on
    fn closed_port_uri() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    fn client() -> HttpBackendClient {
        HttpBackendClient::new().unwrap()
    }

    #[tokio::test]
    async fn test_fetch_config_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"statusOptions":[{"id":"s1","name":"In"},{"id":"s2","name":"Out"}],
                    "buildingOptions":[],"shelfOptions":[],"toteBoxOptions":[],
                    "checkedOutByOptions":[{"id":"e1","name":"Ana"}],"conditionOptions":[]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let config = client().fetch_config(&server.uri()).await.unwrap();
        assert_eq!(
            config.status_options,
            vec![OptionItem::new("s1", "In"), OptionItem::new("s2", "Out")]
        );
        assert_eq!(config.checked_out_by_options[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_fetch_config_http_error_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client().fetch_config(&server.uri()).await.unwrap_err();
        match err {
            FormError::ConfigHttp { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_config_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let err = client().fetch_config(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FormError::ConfigFetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_config_unreachable() {
        let uri = closed_port_uri();

        let err = client().fetch_config(&uri).await.unwrap_err();
        assert!(matches!(err, FormError::ConfigFetch { .. }));
    }

    #[tokio::test]
    async fn test_submit_json_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::to_value(payload()).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_string("Updated task 86a1b2"))
            .expect(1)
            .mount(&server)
            .await;

        let body = client()
            .submit(&server.uri(), SubmitRequest::Json(payload()))
            .await
            .unwrap();
        assert_eq!(body, "Updated task 86a1b2");

        let requests = server.received_requests().await.unwrap();
        let raw = String::from_utf8_lossy(&requests[0].body).to_lowercase();
        assert!(!raw.contains("content-disposition"));
    }

    #[tokio::test]
    async fn test_submit_multipart_has_exactly_two_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let photo = Photo::new("tote-17.jpg", b"\xff\xd8jpeg".to_vec());
        let body = client()
            .submit(
                &server.uri(),
                SubmitRequest::Multipart {
                    payload: payload(),
                    photo,
                },
            )
            .await
            .unwrap();
        assert_eq!(body, "ok");

        let requests = server.received_requests().await.unwrap();
        let request = &requests[0];
        let content_type = request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data"));

        let raw = String::from_utf8_lossy(&request.body);
        let lower = raw.to_lowercase();
        assert_eq!(lower.matches("content-disposition: form-data").count(), 2);
        assert!(raw.contains(r#"name="json""#));
        assert!(raw.contains(r#"name="photo"; filename="tote-17.jpg""#));
        assert!(raw.contains(r#""taskId":"86a1b2""#));
        assert!(lower.contains("content-type: image/jpeg"));
    }

    #[tokio::test]
    async fn test_submit_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unknown task"))
            .mount(&server)
            .await;

        let err = client()
            .submit(&server.uri(), SubmitRequest::Json(payload()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Submit failed: HTTP 422 — unknown task");
    }

    #[tokio::test]
    async fn test_submit_unreachable() {
        let uri = closed_port_uri();

        let err = client()
            .submit(&uri, SubmitRequest::Json(payload()))
            .await
            .unwrap_err();
        assert!(matches!(err, FormError::SubmitNetwork { .. }));
    }
}
