use std::net::SocketAddr;

use clap::Parser;
use color_relay::api::DEFAULT_PATH;

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    #[arg(long, env = "RELAY_PATH", default_value = DEFAULT_PATH)]
    pub path: String,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let args = Args::try_parse_from([
            "color-relay",
            "--database-url",
            "postgres://localhost/relay",
        ])
        .unwrap();

        assert_eq!(args.listen, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(args.path, "/api/data");
        assert_eq!(args.max_connections, 5);
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory as _;

        Args::command().debug_assert();
    }
}
