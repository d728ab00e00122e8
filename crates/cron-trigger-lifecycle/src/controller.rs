//! Cron Trigger Controller - create, read, update and delete hooks
//!
//! The controller drives one trigger through its remote lifecycle. It never
//! retries and keeps no state of its own: every hook takes the current
//! record (or desired spec) and returns the next one.

use crate::error::{LifecycleError, Result};
use crate::schema::{TriggerCapabilities, CAPABILITIES};
use cron_trigger_client::TriggerService;
use cron_trigger_types::{encode, parse_import_key, TriggerRecord, TriggerSpec};
use std::sync::Arc;
use tracing::{info, instrument, warn};

const UPDATE_UNSUPPORTED: &str = "cron triggers cannot be updated";

/// Result of reading a trigger back from the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Present(TriggerRecord),
    /// The remote no longer knows the trigger; drop it from state
    Absent,
}

/// Lifecycle hooks for a cron trigger
pub struct CronTriggerController {
    service: Arc<dyn TriggerService>,
}

impl CronTriggerController {
    pub fn new(service: Arc<dyn TriggerService>) -> Self {
        Self { service }
    }

    /// Replacement policy consulted when diffing
    pub fn capabilities(&self) -> TriggerCapabilities {
        CAPABILITIES
    }

    /// Create the remote trigger and bind it to its pipeline
    #[instrument(skip(self, spec), fields(pipeline_id = %spec.pipeline_id))]
    pub async fn create(&self, spec: &TriggerSpec) -> Result<TriggerRecord> {
        let diagnostics = spec.validate();
        if !diagnostics.is_empty() {
            return Err(LifecycleError::Validation { diagnostics });
        }

        let identity = self
            .service
            .create_trigger_event(&encode(&spec.expression, &spec.message))
            .await?;

        if let Err(e) = self
            .service
            .associate_trigger_with_pipeline(&identity, &spec.pipeline_id)
            .await
        {
            warn!(identity = %identity, error = %e, "Trigger event created but not bound to pipeline");
            return Err(e.into());
        }

        info!(identity = %identity, "Cron trigger created");
        Ok(TriggerRecord::created(identity, spec))
    }

    /// Refresh a record from the remote service
    #[instrument(skip(self, record), fields(identity = %record.identity, pipeline_id = %record.pipeline_id))]
    pub async fn read(&self, record: &TriggerRecord) -> Result<ReadOutcome> {
        let remote = self
            .service
            .get_trigger(&record.identity, &record.pipeline_id)
            .await?;

        let Some(remote) = remote.filter(|r| !r.event.is_empty()) else {
            warn!("Cron trigger not found remotely, removing from state");
            return Ok(ReadOutcome::Absent);
        };

        let values = remote.event.decode()?;
        Ok(ReadOutcome::Present(TriggerRecord {
            identity: remote.event,
            pipeline_id: remote.pipeline_id,
            expression: values.expression,
            message: values.message,
        }))
    }

    /// Always fails: the remote API has no update operation
    ///
    /// Reachable only when a caller bypasses [`plan`](crate::plan::plan), which turns
    /// every field change into a replacement.
    pub async fn update(&self, prior: &TriggerRecord, _desired: &TriggerSpec) -> Result<TriggerRecord> {
        warn!(identity = %prior.identity, "Update requested for cron trigger");
        Err(LifecycleError::UnsupportedOperation(UPDATE_UNSUPPORTED))
    }

    /// Remove the trigger from its pipeline
    #[instrument(skip(self, record), fields(identity = %record.identity, pipeline_id = %record.pipeline_id))]
    pub async fn delete(&self, record: &TriggerRecord) -> Result<()> {
        self.service
            .delete_trigger(&record.identity, &record.pipeline_id)
            .await
            .map_err(LifecycleError::DeleteFailed)?;

        info!("Cron trigger deleted");
        Ok(())
    }

    /// Seed a provisional record from an `EVENT,PIPELINE_ID` import key
    ///
    /// No remote call is made; the next [`read`](Self::read) fills in
    /// expression and message.
    pub fn import(&self, raw: &str) -> Result<TriggerRecord> {
        let key = parse_import_key(raw)?;
        info!(identity = %key.event, pipeline_id = %key.pipeline_id, "Cron trigger imported");
        Ok(TriggerRecord::provisional(key))
    }
}
