mod args;
mod commands;

use clap::Parser;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword { password } => commands::hash_password(password)?,
        Commands::Health { api } => commands::health(&api).await?,
        Commands::Login {
            api,
            email,
            password,
        } => commands::login(&api, &email, password).await?,
        Commands::Upload { api, token, file } => commands::upload(&api, &token, &file).await?,
    }

    Ok(())
}
