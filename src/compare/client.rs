use crate::compare::types::{error_field, ComparisonRequest, ComparisonResult, FileSlot, SelectedFile};
use crate::config::Settings;
use crate::error::CompareError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{error, info};

#[async_trait]
pub trait ComparisonService: Send + Sync {
    async fn compare(&self, request: ComparisonRequest) -> Result<ComparisonResult, CompareError>;
}

#[derive(Clone)]
pub struct HttpComparisonService {
    client: Client,
    endpoint: String,
}

impl HttpComparisonService {
    pub fn new(settings: &Settings) -> Self {
        Self::with_client(Client::new(), settings.compare_endpoint())
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn file_part(file: &SelectedFile) -> Result<Part, CompareError> {
        let content = tokio::fs::read(file.path())
            .await
            .map_err(|source| CompareError::FileRead {
                name: file.name.clone(),
                source,
            })?;
        Ok(Part::bytes(content).file_name(file.name.clone()))
    }
}

#[async_trait]
impl ComparisonService for HttpComparisonService {
    async fn compare(&self, request: ComparisonRequest) -> Result<ComparisonResult, CompareError> {
        let form = Form::new()
            .part(
                FileSlot::First.field_name(),
                Self::file_part(&request.file1).await?,
            )
            .part(
                FileSlot::Second.field_name(),
                Self::file_part(&request.file2).await?,
            );

        info!(
            endpoint = %self.endpoint,
            file1 = %request.file1.name,
            file2 = %request.file2.name,
            "sending comparison request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "comparison request failed");
                CompareError::Transport(e)
            })?;

        let status = response.status();
        let body = if status.is_success() {
            response.bytes().await?
        } else {
            response.bytes().await.unwrap_or_default()
        };

        let outcome = interpret_response(status, &body, &request);
        match &outcome {
            Ok(result) => info!(
                status = status.as_u16(),
                correlation_index = result.correlation_index,
                "comparison finished"
            ),
            Err(e) => info!(status = status.as_u16(), error = %e, "comparison rejected"),
        }
        outcome
    }
}

/// Maps a received response onto a result. Parse failures on the
/// failure path fall back to the status line instead of surfacing; on
/// the success path they are reported like a failed request.
pub fn interpret_response(
    status: StatusCode,
    body: &[u8],
    request: &ComparisonRequest,
) -> Result<ComparisonResult, CompareError> {
    let parsed = serde_json::from_slice::<Value>(body);

    if !status.is_success() {
        let message = parsed.ok().as_ref().and_then(error_field).unwrap_or_else(|| {
            format!(
                "Erro {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
        });
        return Err(CompareError::Server {
            status: status.as_u16(),
            message,
        });
    }

    let value = parsed.map_err(CompareError::UnreadableBody)?;
    ComparisonResult::from_value(&value, request).ok_or(CompareError::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::multipart::Multipart, extract::State, http, routing::post, Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    #[derive(Debug, Clone, PartialEq)]
    struct ReceivedField {
        name: String,
        file_name: Option<String>,
        content: Vec<u8>,
    }

    #[derive(Clone, Default)]
    struct Recorder {
        fields: Arc<Mutex<Vec<ReceivedField>>>,
    }

    async fn record_and_score(
        State(recorder): State<Recorder>,
        mut multipart: Multipart,
    ) -> Json<Value> {
        let mut names = Vec::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content = field.bytes().await.unwrap_or_default().to_vec();
            names.push(file_name.clone().unwrap_or_default());
            recorder.fields.lock().unwrap().push(ReceivedField {
                name,
                file_name,
                content,
            });
        }
        Json(json!({
            "filename1": names.first().cloned().unwrap_or_default(),
            "filename2": names.get(1).cloned().unwrap_or_default(),
            "correlation_index": 0.8532
        }))
    }

    async fn spawn_server(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/compare")
    }

    fn service(endpoint: String) -> HttpComparisonService {
        let client = Client::builder().no_proxy().build().expect("client");
        HttpComparisonService::with_client(client, endpoint)
    }

    fn write_files(dir: &TempDir) -> ComparisonRequest {
        let path1 = dir.path().join("a.txt");
        let path2 = dir.path().join("b.txt");
        std::fs::write(&path1, b"primeiro texto").unwrap();
        std::fs::write(&path2, b"segundo texto").unwrap();
        ComparisonRequest {
            file1: SelectedFile::from_path(path1),
            file2: SelectedFile::from_path(path2),
        }
    }

    fn fixed_request() -> ComparisonRequest {
        ComparisonRequest {
            file1: SelectedFile::from_path("/nonexistent/a.txt"),
            file2: SelectedFile::from_path("/nonexistent/b.txt"),
        }
    }

    #[tokio::test]
    async fn posts_both_files_as_multipart() {
        let recorder = Recorder::default();
        let app = Router::new()
            .route("/compare", post(record_and_score))
            .with_state(recorder.clone());
        let endpoint = spawn_server(app).await;
        let dir = TempDir::new().unwrap();

        let result = service(endpoint).compare(write_files(&dir)).await.unwrap();
        assert_eq!(result.filename1, "a.txt");
        assert_eq!(result.filename2, "b.txt");
        assert_eq!(
            result.summary(),
            "Os arquivos \"a.txt\" e \"b.txt\" possuem um índice de correlação de 0.8532 (85.32%)."
        );

        let fields = recorder.fields.lock().unwrap().clone();
        assert_eq!(
            fields,
            vec![
                ReceivedField {
                    name: "file1".to_string(),
                    file_name: Some("a.txt".to_string()),
                    content: b"primeiro texto".to_vec(),
                },
                ReceivedField {
                    name: "file2".to_string(),
                    file_name: Some("b.txt".to_string()),
                    content: b"segundo texto".to_vec(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn server_error_body_is_surfaced() {
        let app = Router::new().route(
            "/compare",
            post(|| async {
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "internal failure"})),
                )
            }),
        );
        let endpoint = spawn_server(app).await;
        let dir = TempDir::new().unwrap();

        let err = service(endpoint).compare(write_files(&dir)).await.unwrap_err();
        assert_eq!(err.user_message(), "Erro ao processar: internal failure");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let dir = TempDir::new().unwrap();

        let err = service(format!("http://{addr}/compare"))
            .compare(write_files(&dir))
            .await
            .unwrap_err();
        assert!(matches!(err, CompareError::Transport(_)));
        assert_eq!(
            err.user_message(),
            "Erro de conexão ou falha na requisição ao servidor."
        );
    }

    #[tokio::test]
    async fn unreadable_file_stops_before_sending() {
        let err = service("http://127.0.0.1:9/compare".to_string())
            .compare(fixed_request())
            .await
            .unwrap_err();
        assert!(matches!(err, CompareError::FileRead { ref name, .. } if name == "a.txt"));
    }

    #[test]
    fn non_json_failure_uses_status_line() {
        let err = interpret_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            b"<html>oops</html>",
            &fixed_request(),
        )
        .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Erro ao processar: Erro 500: Internal Server Error"
        );
    }

    #[test]
    fn failure_without_error_field_uses_status_line() {
        let err = interpret_response(
            StatusCode::BAD_REQUEST,
            br#"{"error": ""}"#,
            &fixed_request(),
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "Erro ao processar: Erro 400: Bad Request");
    }

    #[test]
    fn success_without_numeric_index_is_malformed() {
        let bodies: [&[u8]; 4] = [
            br#"{"filename1":"a","filename2":"b"}"#,
            br#"{"filename1":"a","filename2":"b","correlation_index":"0.9"}"#,
            b"null",
            b"[0.5]",
        ];
        for body in bodies {
            let err = interpret_response(StatusCode::OK, body, &fixed_request()).unwrap_err();
            assert!(matches!(err, CompareError::MalformedResponse));
            assert_eq!(err.user_message(), "Resposta inválida do servidor.");
        }
    }

    #[test]
    fn success_with_non_json_body_reads_as_connection_failure() {
        let bodies: [&[u8]; 3] = [b"not json", b"", b"<html>ok</html>"];
        for body in bodies {
            let err = interpret_response(StatusCode::OK, body, &fixed_request()).unwrap_err();
            assert!(matches!(err, CompareError::UnreadableBody(_)));
            assert_eq!(
                err.user_message(),
                "Erro de conexão ou falha na requisição ao servidor."
            );
        }
    }

    #[test]
    fn success_body_is_rendered() {
        let result = interpret_response(
            StatusCode::OK,
            br#"{"filename1":"a.txt","filename2":"b.txt","correlation_index":0.8532}"#,
            &fixed_request(),
        )
        .unwrap();
        assert_eq!(result.correlation_index, 0.8532);
    }
}
