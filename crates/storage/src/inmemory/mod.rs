//! In-memory storage backend.
//!
//! Implements every repository trait, foods and carts included, on top of
//! `Arc<RwLock<_>>` collections.
//! Data is not persisted and is lost when the last clone is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use petadoptions_storage::InMemoryRepository;
//!
//! let repo = InMemoryRepository::with_pets(seed_pets);
//! ```

mod repository;

pub use repository::InMemoryRepository;
