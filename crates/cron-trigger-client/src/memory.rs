//! In-memory trigger service
//!
//! Suitable for development and testing. Mirrors the remote behaviour that
//! matters to the lifecycle: identities are assigned on event creation, and
//! a trigger only exists while its event is bound to a pipeline.

use crate::error::{ClientError, Result};
use crate::service::TriggerService;
use async_trait::async_trait;
use cron_trigger_types::{CreateTriggerEvent, PipelineId, RemoteTrigger, TriggerIdentity};
use dashmap::{DashMap, DashSet};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Remote operations, as recorded in the call journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateEvent,
    Associate,
    Get,
    Delete,
}

/// One journal entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCall {
    pub operation: Operation,
    pub identity: Option<TriggerIdentity>,
    pub pipeline_id: Option<PipelineId>,
}

/// In-memory trigger service
pub struct InMemoryTriggerService {
    events: DashMap<TriggerIdentity, CreateTriggerEvent>,
    bindings: DashSet<(TriggerIdentity, PipelineId)>,
    pipelines: DashSet<PipelineId>,
    failures: DashSet<Operation>,
    journal: RwLock<Vec<ServiceCall>>,
}

impl InMemoryTriggerService {
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
            bindings: DashSet::new(),
            pipelines: DashSet::new(),
            failures: DashSet::new(),
            journal: RwLock::new(Vec::new()),
        }
    }

    /// Only accept bindings to the given pipelines
    pub fn with_pipelines<I, P>(pipelines: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PipelineId>,
    {
        let service = Self::new();
        for pipeline in pipelines {
            service.pipelines.insert(pipeline.into());
        }
        service
    }

    /// Make every subsequent call of `operation` fail with an API error
    pub fn fail_on(&self, operation: Operation) {
        self.failures.insert(operation);
    }

    pub fn clear_failures(&self) {
        self.failures.clear();
    }

    /// Drop a binding behind the caller's back
    pub fn remove_remote(&self, identity: &TriggerIdentity, pipeline_id: &PipelineId) -> bool {
        self.bindings
            .remove(&(identity.clone(), pipeline_id.clone()))
            .is_some()
    }

    pub fn contains(&self, identity: &TriggerIdentity, pipeline_id: &PipelineId) -> bool {
        self.bindings
            .contains(&(identity.clone(), pipeline_id.clone()))
    }

    pub fn trigger_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Every call made so far, in order
    pub async fn calls(&self) -> Vec<ServiceCall> {
        self.journal.read().await.clone()
    }

    /// Operations made so far, in order, skipping reads
    pub async fn mutations(&self) -> Vec<Operation> {
        self.journal
            .read()
            .await
            .iter()
            .map(|c| c.operation)
            .filter(|op| *op != Operation::Get)
            .collect()
    }

    async fn record(
        &self,
        operation: Operation,
        identity: Option<&TriggerIdentity>,
        pipeline_id: Option<&PipelineId>,
    ) {
        self.journal.write().await.push(ServiceCall {
            operation,
            identity: identity.cloned(),
            pipeline_id: pipeline_id.cloned(),
        });
    }

    fn check_failure(&self, operation: Operation) -> Result<()> {
        if self.failures.contains(&operation) {
            return Err(ClientError::Api {
                status: 500,
                message: format!("injected failure for {:?}", operation),
            });
        }
        Ok(())
    }

    fn check_pipeline(&self, pipeline_id: &PipelineId) -> Result<()> {
        if !self.pipelines.is_empty() && !self.pipelines.contains(pipeline_id) {
            return Err(ClientError::NotFound(format!("pipeline {}", pipeline_id)));
        }
        Ok(())
    }
}

impl Default for InMemoryTriggerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TriggerService for InMemoryTriggerService {
    async fn create_trigger_event(&self, event: &CreateTriggerEvent) -> Result<TriggerIdentity> {
        // The identity does not exist until the call succeeds.
        self.record(Operation::CreateEvent, None, None).await;
        self.check_failure(Operation::CreateEvent)?;

        let (Some(expression), Some(message)) = (event.expression(), event.message()) else {
            return Err(ClientError::Api {
                status: 400,
                message: "event values must include expression and message".into(),
            });
        };

        let identity = TriggerIdentity::new(format!(
            "{}:{}:{}:{}:{}",
            event.event_type,
            event.kind,
            expression,
            message,
            Uuid::new_v4().simple()
        ));
        self.events.insert(identity.clone(), event.clone());

        debug!(identity = %identity, "Trigger event created");
        Ok(identity)
    }

    async fn associate_trigger_with_pipeline(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<()> {
        self.record(Operation::Associate, Some(identity), Some(pipeline_id))
            .await;
        self.check_failure(Operation::Associate)?;
        self.check_pipeline(pipeline_id)?;

        if !self.events.contains_key(identity) {
            return Err(ClientError::NotFound(format!("event {}", identity)));
        }

        self.bindings.insert((identity.clone(), pipeline_id.clone()));
        Ok(())
    }

    async fn get_trigger(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<Option<RemoteTrigger>> {
        self.record(Operation::Get, Some(identity), Some(pipeline_id))
            .await;
        self.check_failure(Operation::Get)?;

        if !self.contains(identity, pipeline_id) {
            return Ok(None);
        }
        Ok(Some(RemoteTrigger {
            event: identity.clone(),
            pipeline_id: pipeline_id.clone(),
        }))
    }

    async fn delete_trigger(
        &self,
        identity: &TriggerIdentity,
        pipeline_id: &PipelineId,
    ) -> Result<()> {
        self.record(Operation::Delete, Some(identity), Some(pipeline_id))
            .await;
        self.check_failure(Operation::Delete)?;

        if !self.remove_remote(identity, pipeline_id) {
            return Err(ClientError::NotFound(format!(
                "trigger {} on pipeline {}",
                identity, pipeline_id
            )));
        }

        // Events live as long as some pipeline still uses them.
        let still_bound = self.bindings.iter().any(|b| &b.0 == identity);
        if !still_bound && self.events.remove(identity).is_none() {
            warn!(identity = %identity, "Deleted binding had no backing event");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
