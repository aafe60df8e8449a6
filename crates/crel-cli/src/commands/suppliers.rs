//! Suppliers command - inspect the supplier dataset.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use super::{load_config, load_directory};

/// Arguments for the suppliers command.
#[derive(Args)]
pub struct SuppliersArgs {
    #[command(subcommand)]
    command: SuppliersCommand,
}

#[derive(Subcommand)]
enum SuppliersCommand {
    /// List suppliers in the dataset
    List {
        /// Supplier dataset (default: configured dataset)
        dataset: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a supplier dataset
    Check {
        /// Supplier dataset (default: configured dataset)
        dataset: Option<PathBuf>,
    },
}

pub fn run(args: SuppliersArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    match args.command {
        SuppliersCommand::List { dataset, json } => {
            let directory = load_directory(&config, dataset.as_ref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(directory.entries())?);
                return Ok(());
            }

            for entry in directory.entries() {
                println!("{}  <-  {}", style(&entry.display_name).bold(), entry.legal_name);
            }
            println!();
            println!("{} supplier(s)", directory.len());
        }
        SuppliersCommand::Check { dataset } => {
            let path = dataset.clone().unwrap_or_else(|| config.suppliers.dataset.clone());
            let directory = load_directory(&config, dataset.as_ref())?;
            println!(
                "{} {} is valid: {} supplier(s)",
                style("✓").green(),
                path.display(),
                directory.len()
            );
        }
    }

    Ok(())
}
