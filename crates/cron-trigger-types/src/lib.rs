//! Cron Trigger Types
//!
//! Core data model for cron triggers bound to remote pipelines:
//!
//! - **Identifiers**: [`PipelineId`] and the opaque, server-assigned [`TriggerIdentity`]
//! - **Trigger state**: desired [`TriggerSpec`], reconciled [`TriggerRecord`]
//! - **Validation**: pure field validators returning [`Diagnostic`] lists
//! - **Codec**: creation payloads and positional decoding of identities
//! - **Import**: parsing of `EVENT,PIPELINE_ID` adoption keys
//!
//! Nothing in this crate performs I/O. The remote service and the lifecycle
//! controller live in `cron-trigger-client` and `cron-trigger-lifecycle`.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod codec;
pub mod error;
pub mod ids;
pub mod import;
pub mod schedule;
pub mod trigger;
pub mod validate;

// Re-exports
pub use codec::{decode, encode, IDENTITY_TEMPLATE};
pub use error::{DecodeError, ImportError, ScheduleError};
pub use ids::{PipelineId, TriggerIdentity};
pub use import::{parse_import_key, ImportKey};
pub use schedule::Schedule;
pub use trigger::{
    CreateTriggerEvent, RemoteTrigger, TriggerRecord, TriggerSpec, TriggerValues,
    FIELD_EXPRESSION, FIELD_MESSAGE, FIELD_PIPELINE_ID,
};
pub use validate::{
    validate_expression, validate_message, validate_pipeline_id, Diagnostic,
};
