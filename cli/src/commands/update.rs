//! UPDATE command - Overwrite a note's title and content.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_core::Note;
use uuid::Uuid;

use super::create::NoteRequest;
use super::{HumanReadable, make_request, output};

/// Arguments for the update command.
///
/// Omitting `--content` clears the note body.
#[derive(Args)]
pub struct UpdateArgs {
    /// Note ID
    pub id: Uuid,

    /// New title
    pub title: String,

    /// New body
    #[arg(long, short)]
    pub content: Option<String>,
}

/// Execute the update command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: UpdateArgs,
) -> Result<()> {
    let url = format!("{}/api/notes/{}", base_url, args.id);
    let body = NoteRequest {
        title: &args.title,
        content: args.content.as_deref(),
    };

    let note: Note = make_request(client.put(&url).json(&body)).await?;

    if human {
        println!("{}", "Note updated successfully!".green().bold());
        println!();
        note.print_human();
        return Ok(());
    }
    output(&note, human)
}
