//! LOGIN command - Exchange credentials for a bearer token.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::register::AuthSession;
use super::{make_request, output};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    pub username: String,

    #[arg(long, env = "NOTES_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Execute the login command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: LoginArgs,
) -> Result<()> {
    let url = format!("{}/api/auth/login", base_url);
    let body = LoginRequest {
        username: &args.username,
        password: &args.password,
    };

    let session: AuthSession = make_request(client.post(&url).json(&body)).await?;

    output(&session, human)
}
