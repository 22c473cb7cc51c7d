//! Example demonstrating nested configuration records

use envbind::{EnvBind, Map, Options};
use std::time::Duration;

#[derive(Debug, Default, EnvBind)]
struct Http {
    #[env("HTTP_PORT,required")]
    pub port: u16,

    #[env("HTTP_TIMEOUT", default = "30s")]
    pub timeout: Duration,
}

#[derive(Debug, Default, EnvBind)]
struct Database {
    #[env("HOST", default = "localhost")]
    pub host: String,

    // Expanded from other variables of the same source
    #[env("URL,expand", default = "postgres://${DB_HOST}/app")]
    pub url: String,
}

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[env(nested)]
    pub http: Http,

    // Keys of Database are read as DB_HOST and DB_URL
    #[env(nested, prefix = "DB_")]
    pub database: Database,
}

fn main() -> anyhow::Result<()> {
    // A static source instead of the process environment
    let env = Map::from([
        ("HTTP_PORT", "8080"),
        ("HTTP_TIMEOUT", "1m30s"),
        ("DB_HOST", "db.internal"),
    ]);

    let mut config = Config::default();
    envbind::bind_from(&env, &mut config, Options::new())?;

    println!("Nested configuration:");
    println!("  HTTP Port: {}", config.http.port);
    println!("  HTTP Timeout: {:?}", config.http.timeout);
    println!("  Database Host: {}", config.database.host);
    println!("  Database URL: {}", config.database.url);

    Ok(())
}
