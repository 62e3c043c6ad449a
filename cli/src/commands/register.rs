//! REGISTER command - Create an account and print its token.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use notes_core::UserProfile;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, format_timestamp, make_request, output};

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Username (3-50 characters: letters, digits, '_', '.', '-')
    pub username: String,

    /// Email address
    pub email: String,

    /// Password (at least 8 characters)
    #[arg(long, env = "NOTES_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Account plus bearer token, as returned by register and login.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl HumanReadable for AuthSession {
    fn print_human(&self) {
        println!("{}", format!("Signed in as {}", self.user.username).green().bold());
        println!();
        println!("  {} {}", "User ID:".cyan(), self.user.id);
        println!("  {} {}", "Email:".cyan(), self.user.email);
        println!("  {} {}", "Expires:".cyan(), format_timestamp(&self.expires_at));
        println!();
        println!("  {}{}", "export NOTES_TOKEN=".dimmed(), self.token);
    }
}

/// Execute the register command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: RegisterArgs,
) -> Result<()> {
    let url = format!("{}/api/auth/register", base_url);
    let body = RegisterRequest {
        username: &args.username,
        email: &args.email,
        password: &args.password,
    };

    let session: AuthSession = make_request(client.post(&url).json(&body)).await?;

    output(&session, human)
}
