use std::{
    fmt::Display,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use super::jwt::JwtAuth;
use axum::{
    Json,
    body::Body,
    response::{IntoResponse, Response},
};
use clients::envelope::Failure;
use config::AuthConfig;
use context::Authentication;
use http::{Request, StatusCode, header::WWW_AUTHENTICATE};

use tower::Layer;

/// Authentication gate for the routes addressing a single client.
///
/// Without an [`AuthConfig`] every request is let through.
#[derive(Clone)]
pub struct AuthLayer(Arc<AuthLayerInner>);

struct AuthLayerInner {
    jwt: Option<JwtAuth>,
}

impl AuthLayer {
    pub fn new(config: Option<AuthConfig>) -> Self {
        let jwt = config.map(JwtAuth::new);
        Self(Arc::new(AuthLayerInner { jwt }))
    }
}

impl<Service> Layer<Service> for AuthLayer
where
    Service: Send + Clone,
{
    type Service = AuthService<Service>;

    fn layer(&self, next: Service) -> Self::Service {
        AuthService {
            next,
            layer: self.0.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuthService<Service> {
    next: Service,
    layer: Arc<AuthLayerInner>,
}

impl<Service, ReqBody> tower::Service<Request<ReqBody>> for AuthService<Service>
where
    Service: tower::Service<Request<ReqBody>, Response = Response<Body>> + Send + Clone + 'static,
    Service::Future: Send,
    Service::Error: Display + 'static,
    ReqBody: http_body::Body + Send + 'static,
{
    type Response = http::Response<Body>;
    type Error = Service::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response<Body>, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.next.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let mut next = self.next.clone();
        let layer = self.layer.clone();

        Box::pin(async move {
            let Some(jwt) = layer.jwt.as_ref() else {
                return next.call(req).await;
            };

            let (mut parts, body) = req.into_parts();

            match jwt.authenticate(&parts) {
                Ok(token) => {
                    parts.extensions.insert(Authentication { token: Some(token) });
                    next.call(Request::from_parts(parts, body)).await
                }
                Err(auth_error) => {
                    log::debug!("Rejecting {} {}: {auth_error}", parts.method, parts.uri.path());

                    let response = (
                        StatusCode::UNAUTHORIZED,
                        [(WWW_AUTHENTICATE, "Bearer")],
                        Json(Failure::new("Unauthorized")),
                    )
                        .into_response();

                    Ok(response)
                }
            }
        })
    }
}
