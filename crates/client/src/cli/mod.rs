//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the pet adoptions services.
#[derive(Debug, Parser)]
#[command(name = "petadoptions-client")]
#[command(about = "CLI client for the pet adoptions services", long_about = None)]
pub struct Cli {
    /// Pet search service base URL.
    #[arg(long, env = "PETSEARCH_URL", default_value = "http://localhost:8080")]
    pub petsearch_url: String,

    /// Pet list adoptions service base URL.
    #[arg(long, env = "PETLISTADOPTIONS_URL", default_value = "http://localhost:8081")]
    pub petlistadoptions_url: String,

    /// Pay for adoption service base URL.
    #[arg(long, env = "PAYFORADOPTION_URL", default_value = "http://localhost:8082")]
    pub payforadoption_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search pets.
    Search {
        /// Pet type (bunny, kitten, puppy).
        #[arg(long)]
        pettype: Option<String>,
        /// Pet color.
        #[arg(long)]
        petcolor: Option<String>,
        /// Pet id.
        #[arg(long)]
        petid: Option<String>,
    },
    /// List the latest adoptions.
    Adoptions,
    /// Adopt a pet.
    Adopt {
        /// Pet id.
        #[arg(long)]
        pet_id: String,
        /// Pet type.
        #[arg(long)]
        pet_type: String,
        /// Adopting user.
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Archive every adoption and reseed the pets.
    Cleanup,
    /// Check every service's health.
    Health,
}
