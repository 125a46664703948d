//! optparse - command-line option parsing for shell scripts.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use optparse::output::generate_error_output;
use optparse::{generate_json, generate_output, Config, HelpFormatter};
use tracing_subscriber::EnvFilter;

/// Parse command lines against a JSON option schema.
#[derive(Parser, Debug)]
#[command(name = "optparse", version, about, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse script arguments and output environment variables
    Parse {
        /// JSON option schema for the target script
        #[arg(long, env = "OPTPARSE_SCHEMA")]
        schema: String,

        /// Environment variable prefix (overrides schema)
        #[arg(long)]
        prefix: Option<String>,

        /// Treat everything from the first non-option on as arguments
        #[arg(long)]
        stop_at_non_option: bool,

        /// Default for an option not given on the command line
        #[arg(long = "property", value_name = "KEY=VALUE")]
        properties: Vec<String>,

        /// Print a JSON report instead of writing an export file
        #[arg(long)]
        json: bool,

        /// Arguments to parse for the target script
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Print help text for the target script
    Help {
        /// JSON option schema for the target script
        #[arg(long, env = "OPTPARSE_SCHEMA")]
        schema: String,

        /// Usage syntax to print instead of the generated usage line
        #[arg(long)]
        syntax: Option<String>,

        /// Line width
        #[arg(long)]
        width: Option<usize>,

        /// Text printed before the option table
        #[arg(long)]
        header: Option<String>,

        /// Text printed after the option table
        #[arg(long)]
        footer: Option<String>,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_property(property: &str) -> Result<(String, String)> {
    let (key, value) = property
        .split_once('=')
        .ok_or_else(|| anyhow!("property '{}' is not of the form KEY=VALUE", property))?;
    Ok((key.to_string(), value.to_string()))
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            schema,
            prefix,
            stop_at_non_option,
            properties,
            json,
            args,
        } => {
            let cfg = Config::from_json(&schema).context("failed to parse schema JSON")?;
            let options = cfg.to_options().context("invalid schema")?;
            let properties = properties
                .iter()
                .map(|p| parse_property(p))
                .collect::<Result<Vec<_>>>()?;

            let effective_prefix = prefix.as_deref().unwrap_or_else(|| cfg.effective_prefix());

            let parsed = optparse::Parser::new(&options)
                .stop_at_non_option(stop_at_non_option)
                .properties(properties)
                .parse(&args);

            if json {
                let cmd = parsed.context("failed to parse arguments")?;
                println!("{}", serde_json::to_string_pretty(&generate_json(&cmd))?);
                return Ok(());
            }

            let path = match parsed {
                Ok(cmd) => generate_output(&cmd, effective_prefix)
                    .context("failed to generate output file")?,
                Err(err) => generate_error_output(&err.to_string())
                    .context("failed to generate error file")?,
            };
            println!("{}", path.display());
        }
        Commands::Help {
            schema,
            syntax,
            width,
            header,
            footer,
        } => {
            let cfg = Config::from_json(&schema).context("failed to parse schema JSON")?;
            let options = cfg.to_options().context("invalid schema")?;

            let mut formatter = HelpFormatter::new();
            if let Some(width) = width {
                formatter.width = width;
            }

            let auto_usage = syntax.is_none();
            let syntax = syntax.unwrap_or_else(|| cfg.effective_name("program").to_string());
            let help = formatter
                .render_help(
                    &syntax,
                    header.as_deref(),
                    &options,
                    footer.as_deref(),
                    auto_usage,
                )
                .context("failed to render help")?;
            print!("{}", help);
        }
    }

    Ok(())
}
