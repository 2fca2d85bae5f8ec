//! Command-line entry points

pub mod render;
pub mod repl;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, WrapErr};
use tokio::io::AsyncReadExt;

use crate::config::AppConfig;
use crate::core::explain::{ExplainResponse, GenerationController, Level};
use crate::core::logging::LogOutput;

#[derive(Parser, Debug)]
#[command(
    name = "explainthis",
    version,
    about = "Explain any text for a child, a teenager or a professional"
)]
pub struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(short, long, global = true, env = "EXPLAINTHIS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Interactive prompt
    Repl {
        /// Validate structure and retry weak responses
        #[arg(long)]
        validate: bool,
    },

    /// Explain text once and exit
    Explain {
        /// 1/child, 2/teen or 3/professional
        #[arg(short, long, default_value = "1")]
        level: String,

        /// Validate structure and retry weak responses
        #[arg(long)]
        validate: bool,

        /// Retry budget (overrides config)
        #[arg(short, long)]
        retries: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Text to explain; read from stdin when omitted
        text: Vec<String>,
    },

    /// Explain text at several levels
    Batch {
        /// Comma-separated levels (default: all)
        #[arg(short, long, value_delimiter = ',')]
        levels: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Text to explain; read from stdin when omitted
        text: Vec<String>,
    },

    /// Score a response read from stdin without calling the provider
    Check {
        /// 1/child, 2/teen or 3/professional
        #[arg(short, long, default_value = "1")]
        level: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Server logs go to stderr; every other command keeps the terminal clean.
    pub fn log_output(&self) -> LogOutput {
        match self.command {
            Commands::Serve { .. } => LogOutput::Stderr,
            _ => LogOutput::FileOnly,
        }
    }
}

/// Build the controller from config; fails without a credential.
pub fn build_controller(config: &AppConfig) -> miette::Result<Arc<GenerationController>> {
    let provider = config
        .provider_config()?
        .create_provider()
        .into_diagnostic()
        .wrap_err("failed to create the LLM provider")?;

    tracing::info!(
        provider = provider.id(),
        model = provider.model(),
        base_url = config.effective_base_url(),
        "provider ready"
    );

    let controller = GenerationController::new(provider, config.generation_config())
        .with_validator(config.validator());
    Ok(Arc::new(controller))
}

async fn text_or_stdin(words: Vec<String>) -> miette::Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .into_diagnostic()
        .wrap_err("failed to read text from stdin")?;
    Ok(buffer)
}

fn parse_levels(codes: &[String]) -> miette::Result<Option<Vec<Level>>> {
    if codes.is_empty() {
        return Ok(None);
    }
    codes
        .iter()
        .map(|c| c.parse::<Level>().into_diagnostic())
        .collect::<miette::Result<Vec<_>>>()
        .map(Some)
}

fn print_json<T: serde::Serialize>(value: &T) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

pub async fn run(cli: Cli) -> miette::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            let mut settings = config.server.clone();
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            let controller = build_controller(&config)?;
            crate::server::serve(&settings, controller).await?;
        }

        Commands::Repl { validate } => {
            let controller = build_controller(&config)?;
            repl::run(controller, validate || config.repl.validate)
                .await
                .into_diagnostic()?;
        }

        Commands::Explain {
            level,
            validate,
            retries,
            json,
            text,
        } => {
            let controller = build_controller(&config)?;
            let text = text_or_stdin(text).await?;

            let spinner = (!json).then(|| render::spinner("Explaining..."));
            let result = controller.explain(&text, &level, validate, retries).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            let success = result.success;
            if json {
                print_json(&ExplainResponse::from(result))?;
            } else {
                render::print_result(&result);
            }
            if !success {
                miette::bail!("explanation failed");
            }
        }

        Commands::Batch { levels, json, text } => {
            let levels = parse_levels(&levels)?;
            let controller = build_controller(&config)?;
            let text = text_or_stdin(text).await?;
            if text.trim().is_empty() {
                miette::bail!("Text cannot be empty");
            }

            let spinner = (!json).then(|| render::spinner("Explaining at every level..."));
            let results = controller.explain_batch(&text, levels.as_deref()).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            if json {
                let body: BTreeMap<&str, ExplainResponse> = results
                    .into_iter()
                    .map(|(level, result)| (level.code(), ExplainResponse::from(result)))
                    .collect();
                print_json(&body)?;
            } else {
                for result in results.values() {
                    render::print_result(result);
                    println!();
                }
            }
        }

        Commands::Check { level, json } => {
            let level: Level = level.parse().into_diagnostic()?;
            let text = text_or_stdin(Vec::new()).await?;
            let report = config.validator().report(text.trim(), level);
            if json {
                print_json(&report)?;
            } else {
                render::print_report(&report);
            }
        }
    }

    Ok(())
}
