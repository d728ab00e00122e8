//! Field schema and capabilities exposed to the reconciler
//!
//! The remote API cannot modify a trigger in place, so every field is
//! immutable: a change to any of them is planned as delete-then-create.

use cron_trigger_types::{
    TriggerRecord, TriggerSpec, FIELD_EXPRESSION, FIELD_MESSAGE, FIELD_PIPELINE_ID,
};
use serde::Serialize;

/// One field of the trigger resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    pub required: bool,
    pub immutable: bool,
    /// Whether a validator runs on this field before any remote call
    pub validated: bool,
}

pub const TRIGGER_SCHEMA: &[FieldSchema] = &[
    FieldSchema {
        name: FIELD_PIPELINE_ID,
        required: true,
        immutable: true,
        validated: false,
    },
    FieldSchema {
        name: FIELD_EXPRESSION,
        required: true,
        immutable: true,
        validated: true,
    },
    FieldSchema {
        name: FIELD_MESSAGE,
        required: true,
        immutable: true,
        validated: true,
    },
];

/// Look up a field by name
pub fn field(name: &str) -> Option<&'static FieldSchema> {
    TRIGGER_SCHEMA.iter().find(|f| f.name == name)
}

/// What the trigger resource supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriggerCapabilities {
    pub supports_update: bool,
}

/// Cron triggers have no update operation
pub const CAPABILITIES: TriggerCapabilities = TriggerCapabilities {
    supports_update: false,
};

impl TriggerCapabilities {
    /// Whether a change to `field` forces destroy-then-recreate
    pub fn force_replacement_on(&self, field_name: &str) -> bool {
        match field(field_name) {
            Some(f) => f.immutable || !self.supports_update,
            None => false,
        }
    }

    /// Fields whose desired value differs from the reconciled one, in schema order
    pub fn changed_fields(&self, prior: &TriggerRecord, desired: &TriggerSpec) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if prior.pipeline_id != desired.pipeline_id {
            changed.push(FIELD_PIPELINE_ID);
        }
        if prior.expression != desired.expression {
            changed.push(FIELD_EXPRESSION);
        }
        if prior.message != desired.message {
            changed.push(FIELD_MESSAGE);
        }
        changed
    }

    pub fn requires_replacement(&self, prior: &TriggerRecord, desired: &TriggerSpec) -> bool {
        self.changed_fields(prior, desired)
            .iter()
            .any(|f| self.force_replacement_on(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cron_trigger_types::TriggerIdentity;

    fn record() -> TriggerRecord {
        TriggerRecord::created(
            TriggerIdentity::new("cron:codefresh:@daily:old:abc"),
            &TriggerSpec::new("p1", "@daily", "old"),
        )
    }

    #[test]
    fn test_every_field_is_required_and_immutable() {
        assert_eq!(TRIGGER_SCHEMA.len(), 3);
        assert!(TRIGGER_SCHEMA.iter().all(|f| f.required && f.immutable));
        assert!(!field(FIELD_PIPELINE_ID).unwrap().validated);
        assert!(field(FIELD_EXPRESSION).unwrap().validated);
        assert!(field(FIELD_MESSAGE).unwrap().validated);
        assert!(field("secret").is_none());
    }

    #[test]
    fn test_no_update_capability() {
        assert!(!CAPABILITIES.supports_update);
        for f in TRIGGER_SCHEMA {
            assert!(CAPABILITIES.force_replacement_on(f.name));
        }
        assert!(!CAPABILITIES.force_replacement_on("unknown"));
    }

    #[test]
    fn test_unchanged_needs_no_replacement() {
        let desired = TriggerSpec::new("p1", "@daily", "old");
        assert!(CAPABILITIES.changed_fields(&record(), &desired).is_empty());
        assert!(!CAPABILITIES.requires_replacement(&record(), &desired));
    }

    #[test]
    fn test_any_change_requires_replacement() {
        for desired in [
            TriggerSpec::new("p2", "@daily", "old"),
            TriggerSpec::new("p1", "@hourly", "old"),
            TriggerSpec::new("p1", "@daily", "new"),
        ] {
            assert_eq!(CAPABILITIES.changed_fields(&record(), &desired).len(), 1);
            assert!(CAPABILITIES.requires_replacement(&record(), &desired));
        }
    }

    #[test]
    fn test_changed_fields_in_schema_order() {
        let desired = TriggerSpec::new("p2", "@hourly", "new");
        assert_eq!(
            CAPABILITIES.changed_fields(&record(), &desired),
            vec![FIELD_PIPELINE_ID, FIELD_EXPRESSION, FIELD_MESSAGE]
        );
    }
}
