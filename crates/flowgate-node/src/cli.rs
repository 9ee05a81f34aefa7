use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Flowgate - Chain-agnostic data access for the Flow chain
#[derive(Parser)]
#[command(name = "flowgate")]
#[command(about = "Flowgate gateway utilities")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "flowgate.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample gateway configuration
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "flowgate.json")]
        output: PathBuf,
    },

    /// Print the chain parameters and token registry in effect
    Params,

    /// Render a script or event type for a token
    Render {
        /// Template kind (get_balance, get_staked_balance, transfer_tokens,
        /// tokens_deposited, tokens_withdrawn, delegator_rewards_paid)
        #[arg(short, long, default_value = "get_balance")]
        kind: String,

        /// Token symbol
        #[arg(short, long, default_value = "FLOW")]
        symbol: String,

        /// Account address; renders its balance override when one exists
        #[arg(short, long)]
        account: Option<String>,

        /// Render this template file instead of a built-in kind
        #[arg(short, long, conflicts_with = "account")]
        template: Option<PathBuf>,
    },

    /// Convert a fixed-point amount to minor units
    Convert {
        /// Amount such as 1.00000000
        value: String,
    },

    /// Flatten a JSON-encoded execution result
    Flatten {
        /// File holding the JSON value encoding
        #[arg(short, long)]
        file: PathBuf,
    },
}
