use crate::config::RuntimeConfig;
use crate::crew::Crew;
use crate::runtime::{CrewOutput, CrewRuntime};
use async_trait::async_trait;
use jarvis_core::{JarvisError, JarvisResult};
use std::time::Duration;
use tracing::{debug, info};

/// Kicks crews off on a remote crew service over HTTP.
///
/// The service receives the crew as JSON on `POST {endpoint}/crews/kickoff`
/// and answers with a [`CrewOutput`] once every task has run.
pub struct HttpCrewRuntime {
    endpoint: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpCrewRuntime {
    pub fn new(config: &RuntimeConfig) -> JarvisResult<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                JarvisError::Config(
                    "no crew runtime endpoint configured (set JARVIS_CREW_ENDPOINT)".to_string(),
                )
            })?;

        if config.timeout_secs == 0 {
            return Err(JarvisError::Config(
                "crew runtime timeout_secs must be greater than zero".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| JarvisError::Http(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            http,
        })
    }

    pub fn kickoff_url(&self) -> String {
        format!("{}/crews/kickoff", self.endpoint)
    }
}

#[async_trait]
impl CrewRuntime for HttpCrewRuntime {
    fn name(&self) -> &str {
        "http"
    }

    async fn kickoff(&self, crew: &Crew) -> JarvisResult<CrewOutput> {
        let url = self.kickoff_url();
        info!(crew_id = %crew.id, url = %url, "Posting crew to runtime");

        let mut request = self.http.post(&url).json(crew);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| JarvisError::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| JarvisError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(JarvisError::Http(format!(
                "crew runtime error {status}: {body}"
            )));
        }

        debug!(crew_id = %crew.id, bytes = body.len(), "Crew runtime responded");
        serde_json::from_str(&body).map_err(|e| {
            JarvisError::Runtime(format!("unreadable crew output: {e}"))
        })
    }
}
