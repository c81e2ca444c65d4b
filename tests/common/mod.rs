use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;

use intake::config::Config;

/// A running test server instance with a dedicated temporary save directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub save_dir: PathBuf,
    // Held so the directory lives as long as the app
    _root: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post a JSON value to the submit endpoint, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Post a raw body to the submit endpoint, return (body, status).
    pub async fn submit_raw(&self, body: impl Into<reqwest::Body>) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Names of all files in the save directory, sorted.
    pub fn saved_files(&self) -> Vec<String> {
        list_files(&self.save_dir)
    }

    /// Parse a saved record back into JSON.
    pub fn read_record(&self, filename: &str) -> Value {
        let text = std::fs::read_to_string(self.save_dir.join(filename)).expect("record missing");
        serde_json::from_str(&text).expect("record is not JSON")
    }
}

pub fn list_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return vec![];
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Spawn a test app saving into `<tmp>/applications_data`.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spawn a test app, letting the caller adjust the config first.
/// The save directory defaults to `<tmp>/applications_data`.
pub async fn spawn_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let root = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::with_save_dir(root.path().join("applications_data"));
    config.log_level = "warn".to_string();
    customize(&mut config);

    let save_dir = config.save_dir.clone();
    let app = intake::build_app(config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        save_dir,
        _root: root,
    }
}
