//! HTTP client for the Open Food Facts product API.

mod client;
mod error;
mod types;

pub use client::OpenFoodClient;
pub use error::OpenFoodError;
pub use types::{ProductEnvelope, ProductPayload};
