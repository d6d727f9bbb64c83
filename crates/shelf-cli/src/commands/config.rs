//! Config command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use shelf_core::Config;

use crate::output::{Output, OutputFormat};

type Row = (&'static str, Option<String>);

/// Show the effective settings and the files they point at
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let config_file = effective_path(config_path);

    match output.format {
        OutputFormat::Json => {
            let json = to_json(&rows(&config, &config_file));
            println!("{}", Value::Object(json));
        }
        OutputFormat::Quiet => println!("{}", config.data_dir.display()),
        OutputFormat::Human => {
            let rows = rows(&config, &config_file);
            let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
            for (key, value) in rows {
                println!(
                    "{:width$}  {}",
                    key,
                    value.as_deref().unwrap_or("(not set)"),
                    width = width
                );
            }
        }
    }

    Ok(())
}

/// Set a configuration value and write the file back
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    config.set(&key, &value)?;

    let save_path = effective_path(config_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {} in {}", key, value, save_path.display()));
    Ok(())
}

fn effective_path(config_path: Option<&PathBuf>) -> PathBuf {
    config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path)
}

/// Settings first, then the derived file locations
fn rows(config: &Config, config_file: &Path) -> Vec<Row> {
    let mut rows = config.entries();
    rows.push(("config_file", Some(config_file.display().to_string())));
    rows.push((
        "bookmarks_file",
        Some(config.bookmarks_path().display().to_string()),
    ));
    rows.push((
        "categories_file",
        Some(config.categories_path().display().to_string()),
    ));
    rows
}

fn to_json(rows: &[Row]) -> Map<String, Value> {
    rows.iter()
        .map(|(key, value)| {
            let value = value.clone().map(Value::String).unwrap_or(Value::Null);
            (key.to_string(), value)
        })
        .collect()
}
