use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod core;
mod jurisdictions;

#[derive(Debug, Parser)]
#[command(name = "itc", version, about = "Estimate US federal and state income tax")]
struct Opts {
    /// Directory holding bracket configuration (federal/<year>.json, state/<name>/<year>.json)
    #[arg(long, global = true, env = "ITC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate federal and state income tax and take-home pay
    Estimate(cmd::estimate::EstimateCommand),
    /// Show a jurisdiction's bracket table, or the tax on an income bracket by bracket
    Brackets(cmd::brackets::BracketsCommand),
    /// List available jurisdictions
    Jurisdictions(cmd::jurisdictions::JurisdictionsCommand),
    /// Check a bracket configuration document
    Validate(cmd::validate::ValidateCommand),
    /// Print the JSON schema of bracket configuration documents
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    match opts.command {
        Command::Estimate(estimate) => {
            let ctx = cmd::Context::new(opts.data_dir)?;
            estimate.exec(&ctx)
        }
        Command::Brackets(brackets) => {
            let ctx = cmd::Context::new(opts.data_dir)?;
            brackets.exec(&ctx)
        }
        Command::Jurisdictions(jurisdictions) => {
            let ctx = cmd::Context::new(opts.data_dir)?;
            jurisdictions.exec(&ctx)
        }
        Command::Validate(validate) => validate.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
