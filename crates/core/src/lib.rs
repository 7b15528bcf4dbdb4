//! petadoptions_core - pure domain logic for the pet adoption services.
//!
//! Everything here is free of AWS and HTTP concerns: domain types, search
//! filters, the pet food catalog and carts, configuration rules, repository
//! traits and the throttling-aware retry helper. The services and Lambdas
//! build on top of it.

pub mod adoption;
pub mod config;
pub mod food;
pub mod pet;
pub mod retry;
pub mod serde;
pub mod storage;
