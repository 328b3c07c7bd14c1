//! Upstream provider layer for Modelgate.
//!
//! # Architecture
//!
//! - [`traits::ProviderAdapter`] — trait every upstream adapter implements
//! - [`registry`] — static specs for the supported providers
//! - [`http_provider::HttpProvider`] — OpenAI-compatible HTTP adapter
//! - [`dispatch::Dispatcher`] — model → provider → credential → adapter routing

pub mod dispatch;
pub mod http_provider;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use dispatch::{AdapterSet, Dispatcher};
pub use http_provider::HttpProvider;
pub use registry::{ProviderSpec, PROVIDERS};
pub use traits::ProviderAdapter;
