//! Example demonstrating key prefixes

use envbind::{EnvBind, Options};

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Environment variables will be prefixed: MYAPP_DATABASE_URL, MYAPP_API_KEY, etc.
    #[env("DATABASE_URL,required")]
    pub database_url: String,

    #[env("API_KEY,required")]
    pub api_key: String,

    #[env("PORT", default = 8080)]
    pub port: u16,

    #[env("DEBUG")]
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables with prefix
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("MYAPP_API_KEY", "secret-key-123");
    std::env::set_var("MYAPP_PORT", "3000");

    let mut config = Config::default();
    envbind::bind(&mut config, Options::new().with_prefix("MYAPP_"))?;

    println!("Configuration with prefix 'MYAPP_':");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {}", config.api_key);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
