mod commands;
mod config;
mod context;
mod diff;
mod executor;
mod output;
mod test_helpers;
mod traits;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{CheckCommand, SummarizeCommand, SummarizeOptions};
use config::OutputFormat;

#[derive(Parser)]
#[command(name = "plansum")]
#[command(about = "Summarize OpenTofu/Terraform plan output by action", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse plan output and print a grouped summary
    Summarize {
        /// Plan text file ("-" or omitted reads stdin)
        input: Option<String>,

        /// Saved binary plan, rendered with `<executor> show -no-color`
        #[arg(long)]
        plan_file: Option<String>,

        /// Executor used for --plan-file (tofu or terraform)
        #[arg(short, long, env = "PLANSUM_EXECUTOR")]
        executor: Option<String>,

        /// Report format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Include resource bodies in text reports
        #[arg(long)]
        bodies: bool,

        /// Disable colors (also set by NO_COLOR=1)
        #[arg(
            long,
            env = "NO_COLOR",
            action = clap::ArgAction::SetTrue,
            value_parser = clap::builder::FalseyValueParser::new()
        )]
        no_color: bool,

        /// Parse even when the input does not look like a plan
        #[arg(long)]
        force: bool,

        /// Print every parse diagnostic
        #[arg(short, long)]
        verbose: bool,

        /// Config file (defaults to $PLANSUM_CONFIG, then the user config dir)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Check that input is plan output and print per-action counts
    Check {
        /// Plan text file ("-" or omitted reads stdin)
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = context::Context::new();

    match cli.command {
        Commands::Summarize {
            input,
            plan_file,
            executor,
            format,
            output,
            bodies,
            no_color,
            force,
            verbose,
            config,
        } => {
            let options = SummarizeOptions {
                input,
                plan_file,
                executor,
                format,
                output,
                bodies,
                no_color,
                force,
                verbose,
                config,
            };
            SummarizeCommand::execute(&ctx, &options)?;
        }
        Commands::Check { input } => {
            CheckCommand::execute(&ctx, input.as_deref())?;
        }
    }

    Ok(())
}
