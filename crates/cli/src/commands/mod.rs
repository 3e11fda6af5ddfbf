//! Subcommand handlers, one module per record family.

pub mod checkout;
pub mod customers;
pub mod galleries;
pub mod materials;
pub mod price_lists;
pub mod settings;

use std::io::{self, Write};

use chrono::NaiveDate;

use galleria_client::BackofficeApi;

use crate::config::ClientConfig;
use crate::output::OutputFormat;

/// What every handler needs.
pub struct Context<'a> {
    pub api: &'a dyn BackofficeApi,
    pub output: OutputFormat,
    pub config: &'a ClientConfig,
    /// Local date used for open/expired and effective columns.
    pub today: NaiveDate,
}

/// Ask on stderr; anything but `y` declines.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{prompt} [y/N]: ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
