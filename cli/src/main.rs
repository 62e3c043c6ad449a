//! Command-line client for the notes service.
//!
//! Commands:
//! - register / login: obtain a bearer token
//! - list: search, sort and page through your notes
//! - show / create / update / delete: single-note operations
//!
//! Configuration via environment:
//! - NOTES_URL: Base URL of the notes server (default: http://localhost:3000)
//! - NOTES_TOKEN: JWT Bearer token for authentication
//! - NOTES_USER_ID: Caller id for servers running with IDENTITY_MODE=header

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    Credentials, create::CreateArgs, delete::DeleteArgs, list::ListArgs, login::LoginArgs,
    register::RegisterArgs, show::ShowArgs, update::UpdateArgs,
};

/// Notes CLI
///
/// JSON output by default; --human for formatted output.
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notes server URL
    #[arg(
        long,
        env = "NOTES_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    /// JWT Bearer token for authentication
    #[arg(long, env = "NOTES_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Caller id sent as X-User-Id (header identity mode)
    #[arg(long, env = "NOTES_USER_ID", global = true)]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register(RegisterArgs),

    /// Log in and print a token
    Login(LoginArgs),

    /// List your notes
    List(ListArgs),

    /// Show a single note
    Show(ShowArgs),

    /// Create a new note
    Create(CreateArgs),

    /// Replace a note's title and content
    Update(UpdateArgs),

    /// Delete a note
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let credentials = Credentials {
        token: cli.token.clone(),
        user_id: cli.user_id.clone(),
    };
    let client = match commands::build_client(&credentials) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let base_url = cli.url.trim_end_matches('/');
    let result = match cli.command {
        Commands::Register(args) => {
            commands::register::execute(&client, base_url, cli.human, args).await
        }
        Commands::Login(args) => commands::login::execute(&client, base_url, cli.human, args).await,
        Commands::List(args) => commands::list::execute(&client, base_url, cli.human, args).await,
        Commands::Show(args) => commands::show::execute(&client, base_url, cli.human, args).await,
        Commands::Create(args) => {
            commands::create::execute(&client, base_url, cli.human, args).await
        }
        Commands::Update(args) => {
            commands::update::execute(&client, base_url, cli.human, args).await
        }
        Commands::Delete(args) => {
            commands::delete::execute(&client, base_url, cli.human, args).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "notes",
            "--user-id",
            "u1",
            "list",
            "--search",
            "milk",
            "--page",
            "2",
            "--page-size",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.user_id.as_deref(), Some("u1"));
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.search.as_deref(), Some("milk"));
                assert_eq!(args.page, Some(2));
                assert_eq!(args.page_size, Some(10));
            }
            _ => panic!("expected list"),
        }
    }
}
