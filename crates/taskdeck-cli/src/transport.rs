use anyhow::Context;
use taskdeck_core::api::{ApiError, ApiRequest, ApiResponse, Method, Transport};
use tracing::{trace, warn};

/// Carries backend requests over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    origin: String,
}

impl HttpTransport {
    pub fn new(origin: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed building HTTP client for the task backend")?;
        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = request.url(&self.origin);
        trace!(method = %request.method, url = %url, "http request");

        let mut builder = self
            .client
            .request(to_reqwest(request.method), url.as_str())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|error| {
            warn!(url = %url, error = %error, "backend unreachable");
            ApiError::Transport(error.to_string())
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|error| {
            ApiError::Transport(format!("failed reading response body: {error}"))
        })?;
        Ok(ApiResponse::new(status, body))
    }
}
