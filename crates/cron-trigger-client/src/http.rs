//! HTTP trigger service
//!
//! Talks to the remote `hermes` trigger API. Events are addressed by path
//! segment; a `/` inside an event is sent as `_slash_`.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::service::TriggerService;
use async_trait::async_trait;
use cron_trigger_types::{CreateTriggerEvent, PipelineId, RemoteTrigger, TriggerIdentity};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use url::Url;

const SLASH_ESCAPE: &str = "_slash_";

/// HTTP client for the remote trigger API
pub struct HttpTriggerService {
    client: Client,
    base_url: Url,
}

impl HttpTriggerService {
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(api_key)
            .map_err(|e| ClientError::Config(format!("invalid API key: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(config.api_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid API URL {}: {}", config.api_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API URL cannot be a base: {}",
                config.api_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Append percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("API URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn event_segment(identity: &TriggerIdentity) -> String {
        identity.as_str().replace('/', SLASH_ESCAPE)
    }

    fn binding_endpoint(&self, identity: &TriggerIdentity, pipeline_id: &PipelineId) -> Result<Url> {
        let event = Self::event_segment(identity);
        self.endpoint(&["hermes", "triggers", &event, pipeline_id.as_str()])
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(message));
        }
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TriggerService for HttpTriggerService {
    async fn create_trigger_event(&self, event: &CreateTriggerEvent) -> Result<TriggerIdentity> {
        let url = self.endpoint(&["hermes", "events"])?;
        debug!(%url, "POST trigger event");

        let response = self.client.post(url).json(event).send().await?;
        let body = Self::check_status(response).await?.text().await?;
        let event: String = serde_json::from_str(&body)?;
        Ok(TriggerIdentity::new(event))
    }

    async fn associate_trigger_with_pipeline(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<()> {
        let url = self.binding_endpoint(identity, pipeline_id)?;
        debug!(%url, "POST trigger binding");

        let response = self.client.post(url).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn get_trigger(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<Option<RemoteTrigger>> {
        let event = Self::event_segment(identity);
        let url = self.endpoint(&["hermes", "triggers", "event", &event])?;
        debug!(%url, "GET triggers by event");

        let response = self.client.get(url).send().await?;
        let triggers: Vec<RemoteTrigger> = match Self::check_status(response).await {
            Ok(response) => response.json().await?,
            Err(ClientError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(triggers
            .into_iter()
            .find(|t| &t.pipeline_id == pipeline_id))
    }

    async fn delete_trigger(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<()> {
        let url = self.binding_endpoint(identity, pipeline_id)?;
        debug!(%url, "DELETE trigger binding");

        let response = self.client.delete(url).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
