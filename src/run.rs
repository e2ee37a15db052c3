//! Reads a payload, generates its schema, and prints it.

use eip712_schema::{CosmosBaseTypes, TypeTable};
use eip712_schema::payload::{PayloadError, count_message_slots, flatten_payload};
use eip712_typegen::{TypeGenerator, TypegenError, TypesParams};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::{CliArgs, Config, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read payload from {0}: {1}")]
    FileRead(PathBuf, io::Error),
    #[error("Failed to read payload from stdin: {0}")]
    StdinRead(io::Error),
    #[error("Failed to parse payload: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Typegen(#[from] TypegenError),
}

/// Runs one generation as described by `args` and writes the schema to stdout.
pub fn run(args: &CliArgs) -> Result<(), RunError> {
    let config = Config::load(args.config.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");

    let payload = read_payload(args.input.as_deref())?;
    let types = generate(payload, args, &config)?;
    let rendered = if config.pretty() && !args.compact {
        serde_json::to_string_pretty(&types)?
    } else {
        serde_json::to_string(&types)?
    };
    println!("{rendered}");
    Ok(())
}

fn read_payload(input: Option<&Path>) -> Result<Value, RunError> {
    let content = match input {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| RunError::FileRead(path.to_owned(), e))?
        }
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(RunError::StdinRead)?;
            content
        }
    };
    Ok(serde_json::from_str(&content)?)
}

fn generate(mut payload: Value, args: &CliArgs, config: &Config) -> Result<TypeTable, RunError> {
    let slots = if args.flatten {
        flatten_payload(&mut payload)?
    } else {
        count_message_slots(&payload)
    };
    let num_messages = args.num_messages.unwrap_or(slots);
    tracing::info!(num_messages, "Generating EIP-712 types");

    let types = TypeGenerator::new(CosmosBaseTypes)
        .with_max_duplicates(config.max_duplicate_typedefs())
        .generate(TypesParams {
            payload: &payload,
            num_messages,
        })?;
    Ok(types)
}
