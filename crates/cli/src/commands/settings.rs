//! `galleria config ...`

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use crate::config::ClientConfig;
use crate::output::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file, environment and flags applied).
    Show,
    /// Write the effective configuration to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn run(
    config: &ClientConfig,
    path: &Path,
    output: OutputFormat,
    command: ConfigCommand,
) -> Result<()> {
    match command {
        ConfigCommand::Show => match output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
            OutputFormat::Table => {
                println!("# {}", path.display());
                print!("{}", toml::to_string_pretty(config)?);
            }
        },
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            config.save(path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
