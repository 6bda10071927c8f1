//! In-process test harness: builds the app with the header-driven test scheme
//! standing in for real credentials.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode};
use axum::Router;
use greeter_auth::{JwtBearerScheme, JwtConfig, SchemeRegistry, TestAuthOptions, TestAuthScheme};
use greeter_kit::ServerConfig;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret";

/// Builds [`TestClient`]s.
///
/// `default_user_id` may be changed freely until [`create_client`](Self::create_client);
/// each client keeps the value it was created with.
pub struct TestAppFactory {
    pub default_user_id: String,
    pub config: ServerConfig,
    jwt: Option<JwtConfig>,
}

impl Default for TestAppFactory {
    fn default() -> Self {
        Self {
            default_user_id: "1".to_string(),
            config: ServerConfig::default(),
            jwt: None,
        }
    }
}

impl TestAppFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also register the production bearer scheme next to the test scheme.
    pub fn with_bearer(mut self) -> Self {
        self.jwt = Some(JwtConfig::new(JWT_SECRET));
        self
    }

    pub fn create_client(&self) -> TestClient {
        let mut registry = SchemeRegistry::new().with_scheme(TestAuthScheme::new(TestAuthOptions {
            default_user_id: self.default_user_id.clone(),
        }));
        if let Some(jwt) = &self.jwt {
            registry = registry.with_scheme(JwtBearerScheme::new(jwt.clone()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static(TestAuthScheme::SCHEME),
        );

        TestClient {
            app: greeter::app(&self.config, registry),
            default_headers,
        }
    }
}

/// Sends requests straight into the router, adding `default_headers` to each.
pub struct TestClient {
    app: Router,
    default_headers: HeaderMap,
}

impl TestClient {
    pub fn set_default_header(&mut self, name: &str, value: &str) {
        self.default_headers.insert(header_name(name), header_value(value));
    }

    pub fn remove_default_header(&mut self, name: &str) {
        self.default_headers.remove(header_name(name));
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        request.headers_mut().extend(self.default_headers.clone());

        self.app.clone().oneshot(request).await.unwrap()
    }

    /// GET and return the body, failing the test on a non-200 status.
    pub async fn get_string(&self, uri: &str) -> String {
        let response = self.get(uri).await;
        let status = response.status();
        let body = body_string(response).await;
        assert_eq!(status, StatusCode::OK, "GET {uri} failed: {body}");
        body
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn header_name(name: &str) -> HeaderName {
    HeaderName::from_bytes(name.as_bytes()).unwrap()
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_bytes(value.as_bytes()).unwrap()
}
