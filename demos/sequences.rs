//! Example demonstrating sequence fields and optional values

use envbind::{EnvBind, Map, Options};
use std::net::IpAddr;

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[env("PORTS", default = "8080;8081")]
    pub ports: Vec<u16>,

    #[env("TRUSTED_PROXIES")]
    pub trusted_proxies: Vec<IpAddr>,

    // Stays None when the variable is not set
    #[env("REPLICA_COUNT")]
    pub replica_count: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    let env = Map::from([("TRUSTED_PROXIES", "10.0.0.1;10.0.0.2")]);

    let mut config = Config::default();
    envbind::bind_from(&env, &mut config, Options::new().with_slice_separator(";"))?;

    println!("Sequence configuration:");
    println!("  Ports: {:?}", config.ports);
    println!("  Trusted Proxies: {:?}", config.trusted_proxies);
    println!("  Replica Count: {:?}", config.replica_count);

    Ok(())
}
