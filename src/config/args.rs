//! Command-line arguments using clap

use clap::Parser;

/// linkmeter - A minimal URL shortener with Prometheus metrics
#[derive(Parser, Debug, Default)]
#[command(name = "linkmeter")]
#[command(version)]
#[command(about = "A minimal URL shortener with Prometheus metrics", long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file (default: ./config.toml if present)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_flag() {
        let args = Args::parse_from(["linkmeter", "-c", "custom.toml"]);
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        assert!(!args.generate_config);

        let args = Args::parse_from(["linkmeter", "--config=other.toml"]);
        assert_eq!(args.config.as_deref(), Some("other.toml"));
    }

    #[test]
    fn test_parse_generate_config() {
        let args = Args::parse_from(["linkmeter", "--generate-config"]);
        assert!(args.generate_config);
        assert!(args.config.is_none());
    }
}
