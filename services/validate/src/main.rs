use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod dispatch;
mod settings;

use crate::{
    dispatch::{Outcome, SchemaKind},
    settings::ValidateConfig,
};

const USAGE: &str = "usage: validate <schema> [file]";

fn render(value: &impl serde::Serialize, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

fn read_input(path: Option<String>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    let config = ValidateConfig::from_env()?;

    // Initialize logging; stdout is reserved for the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let schema: SchemaKind = args.next().context(USAGE)?.parse()?;
    let input = read_input(args.next())?;
    let payload: Value = serde_json::from_str(&input).context("Input is not valid JSON")?;

    info!("Validating payload against {}", schema);

    match dispatch::run(schema, &payload)? {
        Outcome::Valid(value) => {
            println!("{}", render(&value, config.pretty)?);
            Ok(())
        }
        Outcome::Invalid(err) => {
            warn!("Payload rejected: {}", err);
            println!("{}", render(&err, config.pretty)?);
            std::process::exit(1);
        }
    }
}
