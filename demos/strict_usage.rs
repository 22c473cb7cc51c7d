//! Example demonstrating strict mode and usage output on errors

use envbind::{EnvBind, Map, Options};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, EnvBind)]
struct Config {
    /// Public URL of the service
    #[env("PUBLIC_URL")]
    pub public_url: String,

    #[env("WORKERS", default = 4, usage = "number of worker threads")]
    pub workers: usize,

    /// Secret used to sign session cookies
    #[env("SESSION_SECRET")]
    pub session_secret: String,
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG=envbind=debug shows how each variable was resolved
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Only one of the fields without a default is set
    let env = Map::from([("APP_PUBLIC_URL", "https://example.com")]);

    let mut stderr = std::io::stderr();
    let mut config = Config::default();
    let result = envbind::bind_from(
        &env,
        &mut config,
        Options::new()
            .with_prefix("APP_")
            .with_strict_mode()
            .with_usage_on_error(&mut stderr),
    );

    match result {
        Ok(()) => println!("Configuration loaded: {config:?}"),
        Err(e) => {
            println!("Binding failed: {e}");
            println!("Missing variables: {:?}", e.not_set());
        }
    }

    Ok(())
}
