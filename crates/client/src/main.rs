//! petadoptions-client CLI entry point.

use clap::Parser;
use petadoptions_client::cli::{Cli, Commands, OutputFormat};
use petadoptions_client::output::{format_output, pretty};
use petadoptions_client::{PetAdoptionsClient, Service, ServiceUrls};
use petadoptions_core::pet::PetSearchQuery;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = PetAdoptionsClient::new(ServiceUrls::from_roots(
        &cli.petsearch_url,
        &cli.petlistadoptions_url,
        &cli.payforadoption_url,
    ));

    match cli.command {
        Commands::Search {
            pettype,
            petcolor,
            petid,
        } => {
            let query = PetSearchQuery {
                pettype,
                petcolor,
                petid,
            }
            .normalized();
            let pets = client.search(&query).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&pets, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_pets(&pets)),
            }
        }
        Commands::Adoptions => {
            let adoptions = client.adoption_list().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&adoptions, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_adoptions(&adoptions)),
            }
        }
        Commands::Adopt {
            pet_id,
            pet_type,
            user_id,
        } => {
            let body = client
                .complete_adoption(&pet_id, &pet_type, user_id.as_deref())
                .await?;
            if !cli.quiet {
                println!("Adopted {pet_type} {pet_id}: {body}");
            }
        }
        Commands::Cleanup => {
            client.cleanup_adoptions().await?;
            if !cli.quiet {
                println!("Adoptions archived");
            }
        }
        Commands::Health => {
            let mut healthy = true;
            for service in Service::ALL {
                match client.health(service).await {
                    Ok(status) => println!("{service}: {status}"),
                    Err(e) => {
                        healthy = false;
                        println!("{service}: {e}");
                    }
                }
            }
            if !healthy {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
