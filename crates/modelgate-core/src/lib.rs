//! Core of Modelgate — the provider-agnostic half of the gateway.
//!
//! # Architecture
//!
//! - [`types`] — normalized request/result shapes shared by every provider
//! - [`error`] — the failure taxonomy every component reports through
//! - [`models`] — the model registry (model id → provider + display metadata)
//! - [`params`] — per-provider generation defaults and override resolution
//! - [`sanitize`] — strips reasoning markup from replies
//! - [`config`] — JSON config file + `MODELGATE_*` env overrides
//! - [`env`] — read access to the hosting environment (credentials, overrides)

pub mod config;
pub mod env;
pub mod error;
pub mod models;
pub mod params;
pub mod sanitize;
pub mod types;
pub mod utils;

pub use error::GatewayError;
pub use models::ModelRegistry;
pub use params::ParameterDefaults;
pub use sanitize::ReplySanitizer;
pub use types::{ChatRequest, ChatResponse, ChatResult, Completion, ProviderKind, Usage};
