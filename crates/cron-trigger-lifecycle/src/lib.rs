//! Cron Trigger Lifecycle
//!
//! Create, read and delete hooks for a cron trigger bound to a pipeline, plus
//! the planning that keeps update out of the picture.
//!
//! ## Architectural Boundaries
//!
//! - `cron-trigger-types` owns: field validation, identity codec, import keys
//! - `cron-trigger-client` owns: transport, authentication, timeouts
//! - `cron-trigger-lifecycle` owns: lifecycle hooks, replacement policy, reconciliation
//!
//! ## Key Principle
//!
//! The remote API cannot modify a trigger. Every field is immutable, and any
//! change is planned as delete-then-create. [`CronTriggerController::update`]
//! exists only to fail loudly if that planning is bypassed.
//!
//! ## Usage
//!
//! ```no_run
//! use cron_trigger_client::InMemoryTriggerService;
//! use cron_trigger_lifecycle::{CronTriggerController, Reconciler};
//! use cron_trigger_types::TriggerSpec;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = Arc::new(InMemoryTriggerService::new());
//! let reconciler = Reconciler::new(CronTriggerController::new(service));
//!
//! let spec = TriggerSpec::new("pipeline-xyz", "0 0 12 * * ?", "noon build");
//! let outcome = reconciler.reconcile(None, Some(&spec)).await?;
//! let record = outcome.record;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod controller;
pub mod error;
pub mod plan;
pub mod reconciler;
pub mod schema;

// Re-exports
pub use controller::{CronTriggerController, ReadOutcome};
pub use error::{LifecycleError, Result};
pub use plan::{plan, Plan};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use schema::{field, FieldSchema, TriggerCapabilities, CAPABILITIES, TRIGGER_SCHEMA};
