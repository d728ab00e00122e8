//! Trigger service trait
//!
//! The remote side of the trigger lifecycle. Implementations own transport,
//! authentication and timeouts; callers never retry through this trait.

use crate::error::Result;
use async_trait::async_trait;
use cron_trigger_types::{CreateTriggerEvent, PipelineId, RemoteTrigger, TriggerIdentity};

/// Remote service managing trigger events and their pipeline bindings
#[async_trait]
pub trait TriggerService: Send + Sync {
    /// Create a trigger event and return its server-assigned identity
    async fn create_trigger_event(&self, event: &CreateTriggerEvent) -> Result<TriggerIdentity>;

    /// Bind an existing trigger event to a pipeline
    async fn associate_trigger_with_pipeline(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<()>;

    /// Fetch the trigger bound to a pipeline, `None` if the remote has no such binding
    async fn get_trigger(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<Option<RemoteTrigger>>;

    /// Remove the trigger binding from a pipeline
    async fn delete_trigger(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<()>;

    /// Backend name, for logs
    fn name(&self) -> &str;
}
