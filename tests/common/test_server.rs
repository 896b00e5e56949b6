use std::path::Path;
use std::sync::Arc;

use polyglot::config::DB_FILE_NAME;
use polyglot::server::{AppState, create_router};
use polyglot::store::{SqliteStore, Store};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    pub client: reqwest::Client,
    server_task: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_base_url(None).await
    }

    pub async fn start_with_base_url(public_base_url: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = SqliteStore::new(temp_dir.path().join(DB_FILE_NAME)).expect("open store");
        store.initialize().expect("initialize store");

        let state = Arc::new(AppState::new(Arc::new(store), public_base_url));
        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let server_task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        let server = Self {
            temp_dir,
            base_url,
            client: reqwest::Client::new(),
            server_task: Some(server_task),
        };
        server.wait_for_ready().await;
        server
    }

    async fn wait_for_ready(&self) {
        for _ in 0..50 {
            if self.client.get(self.url("/health")).send().await.is_ok() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        panic!("Server did not become ready");
    }

    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn api(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// POSTs to the authoring API, asserting 201, and returns `data`.
    pub async fn create(&self, path: &str, body: Value) -> Value {
        let resp = self
            .client
            .post(self.api(path))
            .json(&body)
            .send()
            .await
            .expect("send create request");
        assert_eq!(resp.status(), 201, "POST {} {}", path, body);
        let body: Value = resp.json().await.expect("parse create response");
        body["data"].clone()
    }

    pub async fn create_domain(&self, name: &str) -> String {
        id_of(&self.create("/domains", json!({ "name": name })).await)
    }

    pub async fn create_language(&self, name: &str, code: &str) -> String {
        id_of(
            &self
                .create("/languages", json!({ "name": name, "code": code }))
                .await,
        )
    }

    /// Creates a source with `(language_id, text)` translations.
    pub async fn create_source(
        &self,
        key: &str,
        text: &str,
        domain_id: &str,
        translations: &[(&str, &str)],
    ) -> Value {
        let translations: Vec<Value> = translations
            .iter()
            .map(|(language_id, text)| json!({ "language_id": language_id, "text": text }))
            .collect();
        self.create(
            "/sources",
            json!({
                "key": key,
                "text": text,
                "domain_id": domain_id,
                "translations": translations,
            }),
        )
        .await
    }

    /// Runs `GET /api/translations` and returns the status and body.
    pub async fn lookup(&self, key: &str, code: &str) -> (u16, Value) {
        let resp = self
            .client
            .get(self.url("/api/translations"))
            .query(&[("key", key), ("code", code)])
            .send()
            .await
            .expect("send lookup");
        let status = resp.status().as_u16();
        let body: Value = resp.json().await.expect("parse lookup response");
        (status, body)
    }
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("id").to_string()
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(task) = self.server_task.take() {
            task.abort();
        }
    }
}
