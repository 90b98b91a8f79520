//! HTTP adapter: Implementation of AnalysisGateway.
//!
//! Sends the report as a single multipart request (one part named `file`)
//! to `{base_url}/analyze` and decodes the JSON body into a `ReportResult`.
//! One round trip, no chunking, no retry.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::domain::ReportResult;
use crate::ports::{AnalysisGateway, GatewayError, ReportUpload};

/// Analysis service client.
pub struct HttpGateway {
    base_url: String,
    client: Client,
    timeout_secs: u64,
}

impl HttpGateway {
    /// Create a client for the service at `base_url` (e.g. `http://localhost:8000/api`).
    ///
    /// # Errors
    /// Returns `GatewayError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    /// Service root: the base URL without its `/api` suffix.
    fn root_url(&self) -> &str {
        self.base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url)
    }

    /// Probe the service's `/health` endpoint.
    ///
    /// # Errors
    /// Returns a `GatewayError` if the service is unreachable or unhealthy.
    pub fn health(&self) -> Result<(), GatewayError> {
        let url = format!("{}/health", self.root_url());
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(GatewayError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }

    fn classify(&self, e: reqwest::Error) -> GatewayError {
        if e.is_connect() {
            GatewayError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            GatewayError::Timeout(self.timeout_secs)
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

impl AnalysisGateway for HttpGateway {
    fn analyze(&self, upload: &ReportUpload) -> Result<ReportResult, GatewayError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        tracing::debug!("POST {} ({} bytes)", self.analyze_url(), upload.bytes.len());

        let response = self
            .client
            .post(self.analyze_url())
            .multipart(form)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().map_err(|e| self.classify(e))?;
        serde_json::from_str::<ReportResult>(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    fn describe(&self) -> String {
        format!("analysis service at {}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};

    /// Serve `router` on an ephemeral port from a background runtime.
    fn spawn_server(router: Router) -> String {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("runtime");
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind");
                tx.send(listener.local_addr().expect("addr")).expect("send addr");
                axum::serve(listener, router).await.expect("serve");
            });
        });
        let addr = rx.recv().expect("server address");
        format!("http://{addr}/api")
    }

    /// Echo the uploaded part's metadata back inside a valid report.
    async fn echo_analyze(mut multipart: Multipart) -> Result<Json<serde_json::Value>, StatusCode> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            let name = field.name().map(str::to_string);
            let file_name = field.file_name().map(str::to_string).unwrap_or_default();
            let content_type = field.content_type().map(str::to_string).unwrap_or_default();
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;

            if name.as_deref() == Some("file") {
                return Ok(Json(serde_json::json!({
                    "results": [{
                        "test_name": file_name,
                        "value": bytes.len().to_string(),
                        "status": "Normal",
                        "flag": "green",
                        "visual_value": 50,
                        "interpretation": content_type
                    }],
                    "explanation": {
                        "patient_summary": "p",
                        "doctor_summary": "d",
                        "recommendations_patient": ["r"],
                        "correlations_doctor": ["c"],
                        "confidence_score": 77
                    }
                })));
            }
        }
        Err(StatusCode::UNPROCESSABLE_ENTITY)
    }

    #[test]
    fn test_analyze_sends_single_file_part() {
        let router = Router::new()
            .route("/api/analyze", post(echo_analyze))
            .route("/health", get(|| async { "healthy" }));
        let base = spawn_server(router);
        let gateway = HttpGateway::new(&base, 10).expect("client");

        let upload = ReportUpload::new("panel.pdf", b"%PDF-1.7".to_vec());
        let report = gateway.analyze(&upload).expect("Should analyze");

        assert_eq!(report.results[0].test_name, "panel.pdf");
        assert_eq!(report.results[0].value, "8");
        assert_eq!(report.results[0].interpretation, "application/pdf");
        assert!((report.explanation.confidence_score - 77.0).abs() < f64::EPSILON);
        assert!(gateway.health().is_ok());
    }

    #[test]
    fn test_server_error_is_status_failure() {
        let router = Router::new().route(
            "/api/analyze",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model quota exceeded") }),
        );
        let gateway = HttpGateway::new(&spawn_server(router), 10).expect("client");

        let err = gateway
            .analyze(&ReportUpload::new("a.png", vec![0]))
            .unwrap_err();
        match err {
            GatewayError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("quota"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_body_is_decode_failure() {
        let router = Router::new().route(
            "/api/analyze",
            post(|| async { Json(serde_json::json!({ "results": "nope" })) }),
        );
        let gateway = HttpGateway::new(&spawn_server(router), 10).expect("client");

        let err = gateway
            .analyze(&ReportUpload::new("a.png", vec![0]))
            .unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn test_unreachable_service_is_connection_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let gateway =
            HttpGateway::new(&format!("http://127.0.0.1:{port}/api"), 5).expect("client");
        let err = gateway
            .analyze(&ReportUpload::new("a.png", vec![0]))
            .unwrap_err();
        assert!(matches!(err, GatewayError::Connection(_)));
    }

    #[test]
    fn test_root_url_strips_api_suffix() {
        let gateway = HttpGateway::new("http://localhost:8000/api/", 5).expect("client");
        assert_eq!(gateway.root_url(), "http://localhost:8000");
        assert_eq!(gateway.analyze_url(), "http://localhost:8000/api/analyze");
    }
}
