use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use flowgate_core::{flatten, to_minor_units, Address, Value};
use flowgate_scripts::{Generator, ScriptKind};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};
use flowgate_node::config::{generate_sample_config, GatewayConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = if cli.config.exists() {
        Some(GatewayConfig::load(&cli.config)?)
    } else {
        None
    };
    let config = loaded.clone().unwrap_or_default();

    init_logging(&config.log_level);
    match &loaded {
        Some(file) => debug!(
            "Loaded configuration from {:?}, serving from height {}",
            cli.config, file.root_height
        ),
        None => warn!(
            "Configuration file not found: {:?}, using {} defaults. Run 'flowgate init' to create one.",
            cli.config, config.chain_id
        ),
    }

    match cli.command {
        Commands::Init { output } => init_config(output)?,
        Commands::Params => show_params(&config)?,
        Commands::Render {
            kind,
            symbol,
            account,
            template,
        } => render(&config, &kind, &symbol, account.as_deref(), template.as_deref())?,
        Commands::Convert { value } => println!("{}", to_minor_units(&value)?),
        Commands::Flatten { file } => flatten_file(&file)?,
    }

    Ok(())
}

/// Install the fmt subscriber; `RUST_LOG` wins over the configured level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize a new configuration file
fn init_config(output: PathBuf) -> Result<()> {
    info!("Generating sample configuration");

    let config = generate_sample_config();
    config.save(&output)?;

    info!("Configuration saved to {:?}", output);

    println!("\nConfiguration file created: {}", output.display());
    println!("Edit the file to customize the network and token registry.");
    println!("\nTo inspect the resulting parameters, run:");
    println!("  flowgate --config {} params", output.display());

    Ok(())
}

fn show_params(config: &GatewayConfig) -> Result<()> {
    let params = config.to_chain_params()?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

fn render(
    config: &GatewayConfig,
    kind: &str,
    symbol: &str,
    account: Option<&str>,
    template: Option<&Path>,
) -> Result<()> {
    let params = Arc::new(config.to_chain_params()?);
    let chain_id = params.chain_id;
    let generator = Generator::new(params)?;

    let script = if let Some(path) = template {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading template {}", path.display()))?;
        generator.render_source(&source, symbol)?
    } else {
        let kind: ScriptKind = kind.parse().map_err(anyhow::Error::msg)?;
        let custom = match account {
            Some(account) if kind == ScriptKind::Balance => {
                let address = Address::from_hex(account)?;
                generator.custom(symbol, chain_id, &address)?
            }
            Some(_) => {
                warn!("Account overrides only apply to {}", ScriptKind::Balance);
                None
            }
            None => None,
        };
        match custom {
            Some(script) => {
                info!("Rendered balance override for {}", account.unwrap_or_default());
                script
            }
            None => generator.render(kind, symbol)?,
        }
    };

    println!("{}", String::from_utf8(script)?);
    Ok(())
}

fn flatten_file(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)?;
    let value = Value::from_json_cdc(&json)?;

    println!("{}", flatten(&value).to_json_pretty());
    Ok(())
}
