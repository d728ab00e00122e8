//! Trigger state: desired spec, reconciled record and wire payloads

use crate::codec;
use crate::ids::{PipelineId, TriggerIdentity};
use crate::import::ImportKey;
use crate::validate::{self, Diagnostic};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names as exposed to the reconciler
pub const FIELD_PIPELINE_ID: &str = "pipeline_id";
pub const FIELD_EXPRESSION: &str = "expression";
pub const FIELD_MESSAGE: &str = "message";

/// Desired state of a cron trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// Pipeline the trigger is attached to
    pub pipeline_id: PipelineId,
    /// Six-field schedule expression or descriptor
    pub expression: String,
    /// Message delivered with each trigger event
    pub message: String,
}

impl TriggerSpec {
    pub fn new(
        pipeline_id: impl Into<PipelineId>,
        expression: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Run every field validator, accumulating all diagnostics
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = validate::validate_pipeline_id(self.pipeline_id.as_str());
        diagnostics.extend(validate::validate_expression(&self.expression));
        diagnostics.extend(validate::validate_message(&self.message));
        diagnostics
    }
}

/// Expression and message recovered from an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerValues {
    pub expression: String,
    pub message: String,
}

/// Reconciled trigger state tracked between passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRecord {
    /// Primary key, assigned by the remote service
    pub identity: TriggerIdentity,
    pub pipeline_id: PipelineId,
    pub expression: String,
    pub message: String,
}

impl TriggerRecord {
    /// Record for a freshly created trigger
    pub fn created(identity: TriggerIdentity, spec: &TriggerSpec) -> Self {
        Self {
            identity,
            pipeline_id: spec.pipeline_id.clone(),
            expression: spec.expression.clone(),
            message: spec.message.clone(),
        }
    }

    /// Provisional record seeded from an import key
    ///
    /// Expression and message stay empty until the next read fills them in.
    pub fn provisional(key: ImportKey) -> Self {
        Self {
            identity: key.event,
            pipeline_id: key.pipeline_id,
            expression: String::new(),
            message: String::new(),
        }
    }

    /// Seeded from an import key and not yet read back
    pub fn is_provisional(&self) -> bool {
        self.expression.is_empty() && self.message.is_empty()
    }

    /// Whether the identity decodes to this record's own expression and message
    pub fn is_consistent(&self) -> bool {
        if self.identity.is_empty() {
            return true;
        }
        match self.identity.decode() {
            Ok(values) => values.expression == self.expression && values.message == self.message,
            Err(_) => false,
        }
    }

    /// The desired state this record currently satisfies
    pub fn to_spec(&self) -> TriggerSpec {
        TriggerSpec {
            pipeline_id: self.pipeline_id.clone(),
            expression: self.expression.clone(),
            message: self.message.clone(),
        }
    }
}

/// Creation payload for the remote trigger service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTriggerEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub kind: String,
    pub secret: String,
    pub values: BTreeMap<String, String>,
}

impl CreateTriggerEvent {
    pub fn expression(&self) -> Option<&str> {
        self.values.get(codec::VALUE_EXPRESSION).map(String::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.values.get(codec::VALUE_MESSAGE).map(String::as_str)
    }
}

/// Trigger as reported by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTrigger {
    pub event: TriggerIdentity,
    #[serde(rename = "pipeline")]
    pub pipeline_id: PipelineId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> TriggerSpec {
        TriggerSpec::new("pipeline-xyz", "0 0 12 * * ?", "noon build")
    }

    #[test]
    fn test_valid_spec_has_no_diagnostics() {
        assert!(spec().validate().is_empty());
    }

    #[test]
    fn test_validate_accumulates_across_fields() {
        let bad = TriggerSpec::new("", "not a cron", "@");
        let diagnostics = bad.validate();
        let fields: Vec<&str> = diagnostics.iter().map(|d| d.field).collect();
        assert_eq!(fields, vec![FIELD_PIPELINE_ID, FIELD_EXPRESSION, FIELD_MESSAGE]);
    }

    #[test]
    fn test_created_record_is_consistent() {
        let identity = TriggerIdentity::new("cron:codefresh:0 0 12 * * ?:noon build:abc");
        let record = TriggerRecord::created(identity, &spec());
        assert!(record.is_consistent());
        assert_eq!(record.to_spec(), spec());
    }

    #[test]
    fn test_mismatched_record_is_inconsistent() {
        let identity = TriggerIdentity::new("cron:codefresh:@daily:other:abc");
        let record = TriggerRecord::created(identity, &spec());
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_provisional_record_from_import() {
        let key: ImportKey = "cron:codefresh:@daily:hi:abc,pipe".parse().unwrap();
        let record = TriggerRecord::provisional(key);
        assert_eq!(record.identity.as_str(), "cron:codefresh:@daily:hi:abc");
        assert_eq!(record.pipeline_id.as_str(), "pipe");
        assert!(record.expression.is_empty());
        assert!(record.message.is_empty());
        assert!(record.is_provisional());
    }

    #[test]
    fn test_remote_trigger_wire_names() {
        let remote: RemoteTrigger =
            serde_json::from_str(r#"{"event":"cron:codefresh:@daily:hi:abc","pipeline":"p1"}"#)
                .unwrap();
        assert_eq!(remote.pipeline_id.as_str(), "p1");
        assert_eq!(remote.event.as_str(), "cron:codefresh:@daily:hi:abc");
    }
}
