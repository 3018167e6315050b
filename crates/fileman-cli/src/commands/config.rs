//! Configuration and utility commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use fileman_core::AppResult;
use fileman_core::config::AppConfig;
use fileman_core::format::format_xml;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Arguments for `format-xml`
#[derive(Debug, Args)]
pub struct FormatXmlArgs {
    /// XML file to pretty-print
    pub file: PathBuf,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            if shown.session.cookie.is_some() {
                shown.session.cookie = Some("****".to_string());
            }
            output::print_item(&shown, format);
        }
    }
    Ok(())
}

/// Re-indent an XML document and print it.
pub async fn pretty_print_xml(args: &FormatXmlArgs) -> AppResult<()> {
    let source = tokio::fs::read_to_string(&args.file).await?;
    println!("{}", format_xml(&source)?);
    Ok(())
}
