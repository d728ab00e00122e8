//! Strongly-typed identifiers for triggers and pipelines
//!
//! Both IDs are opaque strings owned by the remote service, wrapped in
//! newtype structs for type safety. Unlike local IDs they are never generated
//! here, and they display as the raw string so they can be sent back verbatim.

use crate::codec;
use crate::error::DecodeError;
use crate::trigger::TriggerValues;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle of an existing pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineId(String);

impl PipelineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PipelineId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PipelineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Server-assigned trigger key, shaped `cron:codefresh:<expression>:<message>:<uid>`
///
/// This is the primary key of a trigger in the reconciler's state. It is only
/// ever obtained from the remote service (or an import key), never built
/// locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerIdentity(String);

impl TriggerIdentity {
    pub fn new(event: impl Into<String>) -> Self {
        Self(event.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extract the expression and message embedded in this identity
    pub fn decode(&self) -> Result<TriggerValues, DecodeError> {
        codec::decode(&self.0)
    }
}

impl fmt::Display for TriggerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TriggerIdentity {
    fn from(event: &str) -> Self {
        Self::new(event)
    }
}

impl From<String> for TriggerIdentity {
    fn from(event: String) -> Self {
        Self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_displays_raw() {
        let id = TriggerIdentity::new("cron:codefresh:@daily:hello:abc");
        assert_eq!(id.to_string(), "cron:codefresh:@daily:hello:abc");
    }

    #[test]
    fn test_identity_decode_delegates_to_codec() {
        let id = TriggerIdentity::new("cron:codefresh:0 0 12 * * ?:noon:f00");
        let values = id.decode().unwrap();
        assert_eq!(values.expression, "0 0 12 * * ?");
        assert_eq!(values.message, "noon");
    }

    #[test]
    fn test_pipeline_id_serializes_transparently() {
        let id = PipelineId::new("pipeline-xyz");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"pipeline-xyz\"");
    }

    #[test]
    fn test_empty_ids() {
        assert!(PipelineId::default().is_empty());
        assert!(TriggerIdentity::default().is_empty());
        assert!(!TriggerIdentity::from("x").is_empty());
    }
}
