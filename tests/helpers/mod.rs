//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use http_body_util::BodyExt;
use tower::ServiceExt;

use sharebox_api::{AppState, build_router};
use sharebox_core::config::AppConfig;
use sharebox_share::ShareRegistry;
use sharebox_storage::LocalStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct handle to the file store
    pub store: Arc<LocalStore>,
    /// Direct handle to the share registry
    pub registry: Arc<ShareRegistry>,
    _storage_dir: tempfile::TempDir,
}

/// A collected response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Response body as UTF-8 text.
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("response body is not UTF-8")
    }

    /// The `Location` header, for redirect assertions.
    pub fn location(&self) -> &str {
        self.headers
            .get("location")
            .expect("missing location header")
            .to_str()
            .unwrap()
    }
}

impl TestApp {
    /// Create a test application with default configuration and a
    /// temporary storage directory.
    pub async fn new() -> Self {
        Self::with_max_upload(AppConfig::default().storage.max_upload_size_bytes).await
    }

    /// Create a test application with a custom upload size limit.
    pub async fn with_max_upload(max_upload_size_bytes: u64) -> Self {
        let storage_dir = tempfile::tempdir().expect("failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.root_dir = storage_dir.path().display().to_string();
        config.storage.max_upload_size_bytes = max_upload_size_bytes;

        let store = Arc::new(
            LocalStore::new(&config.storage.root_dir, config.storage.max_upload_size_bytes)
                .await
                .expect("failed to init store"),
        );
        let registry = Arc::new(ShareRegistry::new(config.share.ttl_days));

        let state = AppState {
            config: Arc::new(config),
            store: Arc::clone(&store),
            registry: Arc::clone(&registry),
        };

        Self {
            router: build_router(state),
            store,
            registry,
            _storage_dir: storage_dir,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(request).await
    }

    /// Upload a file through the multipart endpoint.
    pub async fn upload(&self, file_name: &str, content: &[u8]) -> TestResponse {
        self.upload_field("file", file_name, content).await
    }

    /// Upload through the multipart endpoint with an arbitrary field name.
    pub async fn upload_field(
        &self,
        field_name: &str,
        file_name: &str,
        content: &[u8],
    ) -> TestResponse {
        let boundary = "sharebox-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\n\
                 Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("failed to build request");
        self.send(request).await
    }

    /// Stored name of the only file in the store. Panics unless exactly
    /// one file exists.
    pub async fn sole_stored_name(&self) -> String {
        let entries = self.store.list().await.expect("list failed");
        assert_eq!(entries.len(), 1, "expected exactly one stored file");
        entries[0].name.clone()
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let (parts, body) = response.into_parts();
        let body = body.collect().await.expect("failed to read body").to_bytes();

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

/// Pull the share token out of a share confirmation page.
pub fn extract_token(share_page_html: &str) -> String {
    let idx = share_page_html
        .find("/shared/")
        .expect("no share link in page");
    share_page_html[idx + "/shared/".len()..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect()
}
