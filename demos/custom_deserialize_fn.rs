//! Example demonstrating custom parse and deserializer functions

use envbind::{EnvBind, Options};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
struct DatabaseConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Default, Clone, Copy)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

// Custom deserializer for comma-separated strings
fn comma_separated(s: &str) -> Result<Vec<String>, String> {
    Ok(s.split(',').map(|s| s.trim().to_string()).collect())
}

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Uses LogFormat's FromStr
    #[env("LOG_FORMAT", parse)]
    pub log_format: LogFormat,

    // Uses serde_json::from_str (JSON format)
    #[env("LABELS", deserializer = "serde_json::from_str")]
    pub labels: HashMap<String, String>,

    #[env("DATABASE,required", deserializer = "serde_json::from_str")]
    pub database: DatabaseConfig,

    // Uses custom function (comma-separated)
    #[env("COMMA_TAGS", deserializer = "comma_separated")]
    pub comma_tags: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("LOG_FORMAT", "json");
    std::env::set_var("LABELS", r#"{"team":"core","tier":"1"}"#);
    std::env::set_var("DATABASE", r#"{"host":"localhost","port":5432}"#);
    std::env::set_var("COMMA_TAGS", "tag1, tag2, tag3");

    let mut config = Config::default();
    envbind::bind(&mut config, Options::new())?;

    println!("Configuration loaded:");
    println!("  Log Format: {:?}", config.log_format);
    println!("  Labels: {:?}", config.labels);
    println!(
        "  Database: {}:{}",
        config.database.host, config.database.port
    );
    println!("  Comma Tags: {:?}", config.comma_tags);

    Ok(())
}
