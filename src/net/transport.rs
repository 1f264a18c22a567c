//! Concrete [`Transport`]s.
//!
//! Client-side (hydrate): `GlooTransport` issues `fetch` calls via
//! `gloo-net`. Native builds get `ReqwestTransport`, used by tooling and by
//! the integration tests against a local server.

#[cfg(all(test, not(target_arch = "wasm32")))]
#[path = "transport_test.rs"]
mod transport_test;

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(feature = "hydrate")]
pub use browser::GlooTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use async_trait::async_trait;

    use crate::net::api::{ApiError, HttpRequest, HttpResponse, Method, Transport};

    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    #[async_trait(?Send)]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut builder = self.client.request(method(request.method), &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }
            let resp = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status().as_u16();
            let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use async_trait::async_trait;
    use gloo_net::http::RequestBuilder;

    use crate::net::api::{ApiError, HttpRequest, HttpResponse, Method, Transport};

    #[derive(Debug, Clone, Copy, Default)]
    pub struct GlooTransport;

    fn method(method: Method) -> gloo_net::http::Method {
        match method {
            Method::Get => gloo_net::http::Method::GET,
            Method::Post => gloo_net::http::Method::POST,
            Method::Put => gloo_net::http::Method::PUT,
            Method::Patch => gloo_net::http::Method::PATCH,
            Method::Delete => gloo_net::http::Method::DELETE,
        }
    }

    #[async_trait(?Send)]
    impl Transport for GlooTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut builder = RequestBuilder::new(&request.url).method(method(request.method));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;
            let resp = prepared.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
    }
}
