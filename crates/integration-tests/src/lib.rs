use std::time::Duration;

use config::Config;
use context::Claims;
use jwt_compact::{
    AlgorithmExt, Header,
    alg::{Hs256, Hs256Key},
};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use server::ServeConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Shared secret used by [`TestServer::with_auth`].
pub const TEST_JWT_SECRET: &str = "integration-tests-secret";

/// Test client for making HTTP requests to the test server
#[derive(Clone)]
pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
    custom_headers: HeaderMap,
}

impl TestClient {
    /// Create a new test client for the given base URL
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            custom_headers: HeaderMap::new(),
        }
    }

    /// A copy of this client that sends `Authorization: Bearer <token>` on every request.
    pub fn with_bearer(&self, token: &str) -> Self {
        let mut client = self.clone();
        let value = HeaderValue::from_str(&format!("Bearer {token}")).unwrap();
        client.custom_headers.insert(AUTHORIZATION, value);
        client
    }

    /// Create a request with the given method and path
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .headers(self.custom_headers.clone())
    }

    /// Send a request, returning the status and the JSON body
    pub async fn send(&self, request: reqwest::RequestBuilder) -> (u16, Value) {
        let response = request.send().await.unwrap();
        let status = response.status().as_u16();
        let body = response.json().await.unwrap();

        (status, body)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        self.send(self.request(reqwest::Method::POST, path).json(body)).await
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        self.send(self.request(reqwest::Method::GET, path)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (u16, Value) {
        self.send(self.request(reqwest::Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> (u16, Value) {
        self.send(self.request(reqwest::Method::DELETE, path)).await
    }

    /// Send a GET request to the given path, returning Result instead of panicking
    pub async fn try_get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(format!("{}{}", self.base_url, path)).send().await
    }
}

pub struct TestServer {
    pub client: TestClient,
    _task_handle: tokio::task::JoinHandle<()>,
    shutdown_signal: CancellationToken,
}

impl TestServer {
    /// Start a server with in-memory storage and no authentication.
    pub async fn memory() -> Self {
        Self::start(indoc::indoc! {r#"
            [storage]
            type = "memory"
        "#})
        .await
    }

    /// Start a server with in-memory storage behind the JWT gate.
    pub async fn with_auth() -> Self {
        let config = format!(
            indoc::indoc! {r#"
                [server.auth]
                jwt_secret = "{}"
                issuer = "https://auth.example.com"

                [storage]
                type = "memory"
            "#},
            TEST_JWT_SECRET
        );

        Self::start(&config).await
    }

    /// Start a new test server with the given TOML configuration
    pub async fn start(config_toml: &str) -> Self {
        // Write config to a temporary file and use the proper loader to ensure validation
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, config_toml).unwrap();

        let config = Config::load(&config_path).unwrap();
        let health_path = config.server.health.path.clone();

        // Find an available port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let shutdown_signal = CancellationToken::new();

        let serve_config = ServeConfig {
            listen_address: address,
            config,
            shutdown_signal: shutdown_signal.clone(),
            log_filter: "server=debug,clients=debug,config=debug,integration_tests=debug".to_string(),
        };

        let (tx, mut rx) = tokio::sync::oneshot::channel();

        let task_handle = tokio::spawn(async move {
            // Drop the listener so the server can bind to the address
            drop(listener);

            let _ = tx.send(server::serve(serve_config).await);
        });

        let client = TestClient::new(format!("http://{address}"));

        // Verify the server is actually running by making a simple request
        let mut retries = 30;

        loop {
            #[allow(clippy::panic)]
            if let Ok(Err(e)) = rx.try_recv() {
                panic!("Server failed to start: {e}");
            }

            if client.try_get(&health_path).await.is_ok() {
                break;
            }

            retries -= 1;

            #[allow(clippy::panic)]
            if retries == 0 {
                panic!("Server failed to become ready after 30 retries");
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        TestServer {
            client,
            _task_handle: task_handle,
            shutdown_signal,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown_signal.cancel();
    }
}

/// Signs `claims` with [`TEST_JWT_SECRET`].
pub fn sign_token(claims: Claims) -> String {
    sign_token_with(TEST_JWT_SECRET, claims)
}

pub fn sign_token_with(secret: &str, claims: Claims) -> String {
    let key = Hs256Key::new(secret.as_bytes());

    Hs256
        .token(&Header::empty(), &jwt_compact::Claims::new(claims), &key)
        .unwrap()
}

/// A token [`TestServer::with_auth`] accepts.
pub fn valid_token(subject: &str) -> String {
    let mut claims = Claims::for_subject(subject);
    claims.issuer = Some("https://auth.example.com".to_string());

    sign_token(claims)
}
