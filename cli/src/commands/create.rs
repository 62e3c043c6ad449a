//! CREATE command - Create a new note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_core::Note;
use serde::Serialize;

use super::{HumanReadable, make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Note title (at most 200 characters)
    pub title: String,

    /// Note body
    #[arg(long, short)]
    pub content: Option<String>,
}

/// Request body shared by create and update.
#[derive(Serialize)]
pub(crate) struct NoteRequest<'a> {
    pub title: &'a str,
    pub content: Option<&'a str>,
}

/// Execute the create command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: CreateArgs,
) -> Result<()> {
    let url = format!("{}/api/notes", base_url);
    let body = NoteRequest {
        title: &args.title,
        content: args.content.as_deref(),
    };

    let note: Note = make_request(client.post(&url).json(&body)).await?;

    if human {
        println!("{}", "Note created successfully!".green().bold());
        println!();
        note.print_human();
        return Ok(());
    }
    output(&note, human)
}
