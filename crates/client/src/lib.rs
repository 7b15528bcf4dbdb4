//! petadoptions_client - HTTP client and CLI for the pet adoptions services.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::{search_url, PetAdoptionsClient, Service, ServiceUrls};
pub use error::{ClientError, Result};
