//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Self-service password reset for LDAP directories
#[derive(Parser, Debug)]
#[command(name = "sspr-ldap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Verify that the configured directory is reachable
    Check,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to SERVER_HOST from the configuration)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to PORT from the configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::parse_from(["sspr-ldap", "serve", "--host", "127.0.0.1", "-p", "9000"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(args.port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_verbose() {
        let cli = Cli::parse_from(["sspr-ldap", "-v", "check"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check));
    }
}
