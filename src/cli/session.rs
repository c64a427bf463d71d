use clap::Subcommand;
use weekmenu::{Config, auth::JwtAuthProvider};

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Print a session token for a subject, to be sent as the `auth_token` cookie
    Token {
        subject: String,
    },
}

pub fn run(config: Config, command: SessionCommand) -> anyhow::Result<()> {
    let provider = JwtAuthProvider::new(config.jwt);

    match command {
        SessionCommand::Token { subject } => {
            let token = provider.issue_token(&subject)?;
            tracing::info!(subject = %subject, "Session token issued");
            println!("{token}");
        }
    }

    Ok(())
}
