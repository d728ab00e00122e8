//! Cron Trigger Client
//!
//! The remote collaborator of the trigger lifecycle:
//!
//! - **TriggerService**: create events, bind them to pipelines, read and delete bindings
//! - **InMemoryTriggerService**: development and test backend with a call journal
//! - **HttpTriggerService**: `reqwest` client for the remote trigger API
//! - **ClientConfig**: endpoint, API key and timeout, from TOML and environment
//!
//! ## In-Memory vs HTTP
//!
//! Both backends implement the same trait, so the lifecycle controller is
//! unaware of which one it drives. Retries, caching and connection pooling
//! are the backend's concern; the in-memory backend does none of them.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod service;

// Re-exports
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::HttpTriggerService;
pub use memory::{InMemoryTriggerService, Operation, ServiceCall};
pub use service::TriggerService;
