//! Basic usage example

use envbind::{EnvBind, Options};

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Required field: loaded from DATABASE_URL environment variable
    #[env("DATABASE_URL,required")]
    pub database_url: String,

    // With default value
    #[env("SERVER_ADDR", default = "127.0.0.1:8080")]
    pub server_addr: String,

    // Numeric type
    #[env("MAX_CONNECTIONS", default = 10)]
    pub max_connections: u32,

    // Boolean type, key taken from the field name
    #[env]
    pub debug_mode: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    // Load configuration
    let mut config = Config::default();
    envbind::bind(&mut config, Options::new())?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);

    Ok(())
}
