//! Reconciliation planning
//!
//! Plans are computed against freshly read remote state. There is no update
//! plan: a trigger either stays as it is or is replaced.

use crate::schema::CAPABILITIES;
use cron_trigger_types::{TriggerRecord, TriggerSpec};
use serde::Serialize;

/// Action selected for one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Plan {
    /// Nothing reconciled and nothing desired
    Noop,
    Create,
    /// Fields unchanged; keep the remote state as read
    Refresh,
    /// Delete the existing trigger, then create the desired one
    Replace { changed: Vec<&'static str> },
    Delete,
}

impl Plan {
    pub fn is_replacement(&self) -> bool {
        matches!(self, Plan::Replace { .. })
    }
}

/// Choose the action that moves `prior` to `desired`
pub fn plan(prior: Option<&TriggerRecord>, desired: Option<&TriggerSpec>) -> Plan {
    match (prior, desired) {
        (None, None) => Plan::Noop,
        (None, Some(_)) => Plan::Create,
        (Some(_), None) => Plan::Delete,
        (Some(record), Some(spec)) => {
            if CAPABILITIES.requires_replacement(record, spec) {
                Plan::Replace {
                    changed: CAPABILITIES.changed_fields(record, spec),
                }
            } else {
                Plan::Refresh
            }
        }
    }
}
