use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lantern", version, about = "Operator tools for the Lantern content API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print an Argon2 hash for LANTERN__AUTH__ADMIN_PASSWORD_HASH
    HashPassword {
        /// Password to hash. Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Check that a running server is up
    Health {
        #[arg(long, env = "LANTERN_API_URL", default_value = "http://127.0.0.1:8080")]
        api: String,
    },
    /// Log in as the admin and print the bearer token
    Login {
        #[arg(long, env = "LANTERN_API_URL", default_value = "http://127.0.0.1:8080")]
        api: String,
        #[arg(long, env = "LANTERN_ADMIN_EMAIL")]
        email: String,
        /// Read from stdin when omitted.
        #[arg(long, env = "LANTERN_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Upload an image through the media relay and print its reference
    Upload {
        #[arg(long, env = "LANTERN_API_URL", default_value = "http://127.0.0.1:8080")]
        api: String,
        #[arg(long, env = "LANTERN_TOKEN", hide_env_values = true)]
        token: String,
        file: PathBuf,
    },
}
