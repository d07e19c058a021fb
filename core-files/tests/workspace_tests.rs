//! Workspace flow tests through the public crate API: authenticated
//! requests, the re-fetch-after-mutation contract, and event emission.

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_api::{ApiClient, TokenSource};
use core_files::{FileUpload, FileWorkspace};
use core_runtime::events::{CoreEvent, EventBus, FileEvent};
use mockall::mock;
use std::collections::HashMap;
use std::sync::Arc;

mock! {
    Http {}

    #[async_trait]
    impl HttpClient for Http {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
    }
}

struct StaticTokens(Option<&'static str>);

#[async_trait]
impl TokenSource for StaticTokens {
    async fn current(&self) -> std::result::Result<Option<String>, BridgeError> {
        Ok(self.0.map(|t| t.to_string()))
    }
}

fn response(status: u16, body: &'static str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::new(),
        body: Bytes::from_static(body.as_bytes()),
    }
}

fn build_workspace(
    mock_http: MockHttp,
    token: Option<&'static str>,
) -> (FileWorkspace, EventBus) {
    let event_bus = EventBus::new(16);
    let api = ApiClient::new(
        Arc::new(mock_http),
        "http://localhost:5000/api",
        Arc::new(StaticTokens(token)),
    )
    .unwrap();
    (FileWorkspace::new(api, event_bus.clone()), event_bus)
}

#[tokio::test]
async fn workspace_requests_carry_the_session_token() {
    let mut mock_http = MockHttp::new();
    mock_http.expect_execute().times(1).returning(|req| {
        assert_eq!(
            req.headers.get("Authorization"),
            Some(&"Bearer t1".to_string())
        );
        Ok(response(200, r#"{"files":[]}"#))
    });

    let (workspace, _bus) = build_workspace(mock_http, Some("t1"));
    workspace.refresh().await.unwrap();
}

#[tokio::test]
async fn upload_then_delete_keeps_cache_equal_to_server_state() {
    let mut mock_http = MockHttp::new();

    // Upload, then the refresh it triggers
    mock_http
        .expect_execute()
        .withf(|req| req.url.ends_with("/file/upload"))
        .times(1)
        .returning(|_| Ok(response(200, r#"{"success":true}"#)));
    mock_http
        .expect_execute()
        .withf(|req| req.method == HttpMethod::Get)
        .times(1)
        .returning(|_| {
            Ok(response(
                200,
                r#"{"files":[{"filename":"notes.txt","url":"u1"}]}"#,
            ))
        });

    // Delete, then the refresh it triggers
    mock_http
        .expect_execute()
        .withf(|req| req.method == HttpMethod::Delete)
        .times(1)
        .returning(|req| {
            assert!(req.url.ends_with("/file/notes.txt"));
            Ok(response(200, r#"{"success":true}"#))
        });
    mock_http
        .expect_execute()
        .withf(|req| req.method == HttpMethod::Get)
        .times(1)
        .returning(|_| Ok(response(200, r#"{"files":[]}"#)));

    let (workspace, event_bus) = build_workspace(mock_http, Some("t1"));
    let mut events = event_bus.subscribe();

    workspace
        .upload(FileUpload::new("notes.txt", Bytes::from_static(b"hello")))
        .await
        .unwrap();

    let files = workspace.files().await;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].filename, "notes.txt");

    workspace.delete("notes.txt").await.unwrap();
    assert!(workspace.files().await.is_empty());

    // Event order: upload accepted, list refreshed, delete, list refreshed
    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Files(FileEvent::Uploaded {
            filename: "notes.txt".to_string()
        })
    );
    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Files(FileEvent::ListRefreshed { count: 1 })
    );
    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Files(FileEvent::Deleted {
            filename: "notes.txt".to_string()
        })
    );
    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Files(FileEvent::ListRefreshed { count: 0 })
    );
}

#[tokio::test]
async fn failed_upload_emits_failure_and_preserves_cache() {
    let mut mock_http = MockHttp::new();

    mock_http
        .expect_execute()
        .withf(|req| req.method == HttpMethod::Get)
        .times(1)
        .returning(|_| Ok(response(200, r#"{"files":[{"filename":"a.txt","url":"u1"}]}"#)));
    mock_http
        .expect_execute()
        .withf(|req| req.url.ends_with("/file/upload"))
        .times(1)
        .returning(|_| Ok(response(200, r#"{"success":false,"message":"quota exceeded"}"#)));

    let (workspace, event_bus) = build_workspace(mock_http, Some("t1"));
    workspace.refresh().await.unwrap();

    let mut events = event_bus.subscribe();

    let result = workspace
        .upload(FileUpload::new("big.bin", Bytes::from_static(b"...")))
        .await;

    assert!(result.is_err());
    assert_eq!(workspace.files().await.len(), 1);
    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Files(FileEvent::OperationFailed {
            message: "quota exceeded".to_string()
        })
    );
}
