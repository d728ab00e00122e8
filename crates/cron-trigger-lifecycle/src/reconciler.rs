//! Reconciliation pass
//!
//! One pass takes the last reconciled record and the desired spec, reads the
//! record back, plans an action and applies it through the controller.
//! Validation runs before any remote call, so a rejected spec never leaves
//! partial remote state.

use crate::controller::{CronTriggerController, ReadOutcome};
use crate::error::{LifecycleError, Result};
use crate::plan::{plan, Plan};
use cron_trigger_types::{TriggerRecord, TriggerSpec};
use tracing::{info, instrument};

/// Result of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub plan: Plan,
    /// State to persist; `None` means the trigger is absent
    pub record: Option<TriggerRecord>,
}

/// Drives a cron trigger from its reconciled state to its desired state
pub struct Reconciler {
    controller: CronTriggerController,
}

impl Reconciler {
    pub fn new(controller: CronTriggerController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &CronTriggerController {
        &self.controller
    }

    /// Run one pass
    #[instrument(skip_all, fields(identity = ?prior.as_ref().map(|r| &r.identity)))]
    pub async fn reconcile(
        &self,
        prior: Option<TriggerRecord>,
        desired: Option<&TriggerSpec>,
    ) -> Result<ReconcileOutcome> {
        if let Some(spec) = desired {
            let diagnostics = spec.validate();
            if !diagnostics.is_empty() {
                return Err(LifecycleError::Validation { diagnostics });
            }
        }

        // Refresh before diffing. Imported records carry no fields until read,
        // and a trigger removed remotely is planned from scratch.
        let prior = match prior {
            Some(record) => match self.controller.read(&record).await? {
                ReadOutcome::Present(refreshed) => Some(refreshed),
                ReadOutcome::Absent => None,
            },
            None => None,
        };

        let selected = plan(prior.as_ref(), desired);
        let record = match (&selected, prior, desired) {
            (Plan::Create, _, Some(spec)) => Some(self.controller.create(spec).await?),
            (Plan::Refresh, refreshed, _) => refreshed,
            (Plan::Replace { changed }, Some(record), Some(spec)) => {
                info!(identity = %record.identity, ?changed, "Replacing cron trigger");
                self.controller.delete(&record).await?;
                Some(self.controller.create(spec).await?)
            }
            (Plan::Delete, Some(record), _) => {
                self.controller.delete(&record).await?;
                None
            }
            _ => None,
        };

        Ok(ReconcileOutcome {
            plan: selected,
            record,
        })
    }
}
