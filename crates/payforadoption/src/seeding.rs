//! Demo data reset.

use std::path::Path;

use anyhow::Context;
use petadoptions_core::pet::{parse_seed, seed_pets, Pet};

use crate::state::AppState;

/// Pets from `seed_file`, or the bundled seed pets when none is configured.
pub async fn load_seed(seed_file: Option<&Path>) -> anyhow::Result<Vec<Pet>> {
    match seed_file {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read seed file {}", path.display()))?;
            parse_seed(&json).with_context(|| format!("Invalid seed file {}", path.display()))
        }
        None => Ok(seed_pets()?),
    }
}

/// Writes the seed pets to the pets table and creates the SQL tables.
///
/// Returns the number of pets written.
pub async fn seed(state: &AppState) -> anyhow::Result<usize> {
    let pets = load_seed(state.seed_file.as_deref()).await?;
    state.pet_repo.put_pets(&pets).await?;
    state.transaction_repo.create_tables().await?;

    tracing::info!(pets = pets.len(), "Seeding complete");
    Ok(pets.len())
}
