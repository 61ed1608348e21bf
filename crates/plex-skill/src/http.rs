//! HTTP backend for the media control server.

use crate::actions::{ActionRequest, Method};
use crate::config::SkillConfig;
use crate::error::{Result, SkillError};
use crate::traits::ControlServer;
use crate::types::ActionResponse;
use async_trait::async_trait;

/// Header carrying the shared API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

pub struct HttpControlServer {
    config: SkillConfig,
    client: reqwest::Client,
}

impl HttpControlServer {
    pub fn new(config: SkillConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SkillError::Transport(format!("building HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn build(&self, request: &ActionRequest) -> Result<reqwest::RequestBuilder> {
        let url = self.config.endpoint(request.path)?;
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        if let Some(client) = &request.client {
            builder = builder.query(&[("client", client)]);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.header(API_KEY_HEADER, self.config.api_key()))
    }
}

#[async_trait]
impl ControlServer for HttpControlServer {
    async fn perform(&self, request: &ActionRequest) -> Result<ActionResponse> {
        let start = std::time::Instant::now();
        let resp = self
            .build(request)?
            .send()
            .await
            .map_err(|e| {
                SkillError::Transport(format!("{} {}: {}", method_name(request), request.path, e))
            })?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SkillError::Transport(format!("reading {} body: {}", request.path, e)))?;
        tracing::debug!(
            path = request.path,
            %status,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "control server replied"
        );

        // Domain failures may arrive with a non-2xx status; the body decides.
        match serde_json::from_slice::<ActionResponse>(&bytes) {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(SkillError::Transport(format!(
                "{}: HTTP {}",
                request.path, status
            ))),
            Err(e) => Err(SkillError::MalformedResponse(format!("{}: {}", request.path, e))),
        }
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}

fn method_name(request: &ActionRequest) -> &'static str {
    match request.method {
        Method::Get => "GET",
        Method::Post => "POST",
    }
}
