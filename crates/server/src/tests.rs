use axum::{
    Router,
    body::{Body, to_bytes},
};
use config::Config;
use context::Claims;
use http::{
    Method, Request, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE},
};
use indoc::indoc;
use jwt_compact::{
    AlgorithmExt, Header,
    alg::{Hs256, Hs256Key},
};
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

async fn app(config: &str) -> Router {
    let config: Config = toml::from_str(config).unwrap();
    config.validate().unwrap();

    crate::router(&config).await.unwrap()
}

async fn authenticated_app() -> Router {
    app(indoc! {r#"
        [server.auth]
        jwt_secret = "integration-secret"
        audience = "client-api"

        [storage]
        type = "memory"
    "#})
    .await
}

fn token(secret: &str, claims: Claims) -> String {
    let key = Hs256Key::new(secret.as_bytes());
    Hs256
        .token(&Header::empty(), &jwt_compact::Claims::new(claims), &key)
        .unwrap()
}

fn valid_token() -> String {
    let mut claims = Claims::for_subject("u1");
    claims.audience = Some(vec!["client-api".to_string()]);

    token(SECRET, claims)
}

struct Call {
    method: Method,
    uri: &'static str,
    token: Option<String>,
    body: Option<Value>,
}

impl Call {
    fn new(method: Method, uri: &'static str) -> Self {
        Self {
            method,
            uri,
            token: None,
            body: None,
        }
    }

    fn token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    async fn send(self, app: &Router) -> (StatusCode, http::HeaderMap, Value) {
        let mut request = Request::builder().method(self.method).uri(self.uri);

        if let Some(token) = self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match self.body {
            Some(body) => {
                request = request.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).unwrap())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, headers, serde_json::from_slice(&bytes).unwrap())
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = authenticated_app().await;

    let (status, _, body) = Call::new(Method::GET, "/unknown-route").send(&app).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    insta::assert_json_snapshot!(body, @r#"
    {
      "message": "Not found",
      "success": false
    }
    "#);
}

#[tokio::test]
async fn unsupported_method_is_not_found() {
    let app = authenticated_app().await;

    let (status, _, body) = Call::new(Method::PATCH, "/clients/u1")
        .token(valid_token())
        .json(json!({ "clientName": "N2" }))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Not found" }));
}

#[tokio::test]
async fn health_is_public() {
    let app = authenticated_app().await;

    let (status, _, body) = Call::new(Method::GET, "/health").send(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn create_needs_no_token() {
    let app = authenticated_app().await;

    let (status, _, body) = Call::new(Method::POST, "/clients")
        .json(json!({ "userSub": "u1", "clientName": "N" }))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"], json!({ "userSub": "u1", "clientName": "N" }));
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let app = authenticated_app().await;

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({ "clientName": "N2" }))),
        (Method::DELETE, None),
    ] {
        let mut call = Call::new(method, "/clients/u1");

        if let Some(body) = body {
            call = call.json(body);
        }

        let (status, headers, body) = call.send(&app).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers.get(WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert_eq!(body, json!({ "success": false, "message": "Unauthorized" }));
    }
}

#[tokio::test]
async fn gate_runs_before_validation() {
    let app = authenticated_app().await;

    let (status, _, _) = Call::new(Method::PUT, "/clients/u1")
        .json(json!({ "clientName": "" }))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = Call::new(Method::PUT, "/clients/u1")
        .token(valid_token())
        .json(json!({ "clientName": "" }))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("\"clientName\" is not allowed to be empty"));
}

#[tokio::test]
async fn rejects_token_signed_with_another_secret() {
    let app = authenticated_app().await;

    let mut claims = Claims::for_subject("u1");
    claims.audience = Some(vec!["client-api".to_string()]);

    let (status, _, _) = Call::new(Method::GET, "/clients/u1")
        .token(token("some-other-secret", claims))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rejects_wrong_audience() {
    let app = authenticated_app().await;

    let mut claims = Claims::for_subject("u1");
    claims.audience = Some(vec!["billing".to_string()]);

    let (status, _, _) = Call::new(Method::GET, "/clients/u1")
        .token(token(SECRET, claims))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rejects_expired_token() {
    let app = authenticated_app().await;

    let mut claims = Claims::for_subject("u1");
    claims.audience = Some(vec!["client-api".to_string()]);
    claims.additional.insert("exp".to_string(), json!(1));

    let (status, _, _) = Call::new(Method::GET, "/clients/u1")
        .token(token(SECRET, claims))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_the_handler() {
    let app = authenticated_app().await;

    let (status, _, body) = Call::new(Method::GET, "/clients/u1")
        .token(valid_token())
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Client not found" }));
}

#[tokio::test]
async fn without_auth_config_everything_passes() {
    let app = app(indoc! {r#"
        [storage]
        type = "memory"
    "#})
    .await;

    let (status, _, _) = Call::new(Method::POST, "/clients")
        .json(json!({ "userSub": "u1", "clientName": "N" }))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = Call::new(Method::GET, "/clients/u1").send(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["clientName"], json!("N"));
}

#[tokio::test]
async fn custom_mount_point() {
    let app = app(indoc! {r#"
        [clients]
        path = "/v1/clients"

        [server.health]
        enabled = false

        [storage]
        type = "memory"
    "#})
    .await;

    let (status, _, _) = Call::new(Method::POST, "/v1/clients")
        .json(json!({ "userSub": "u1", "clientName": "N" }))
        .send(&app)
        .await;

    assert_eq!(status, StatusCode::CREATED);

    let (status, _, _) = Call::new(Method::GET, "/health").send(&app).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn panic_payload_becomes_internal_error() {
    let response = crate::fallback::panic(Box::new("boom"));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
