//! SHOW command - Print a single note.

use anyhow::Result;
use clap::Args;
use notes_core::Note;
use uuid::Uuid;

use super::{make_request, output};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID
    pub id: Uuid,
}

/// Execute the show command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ShowArgs,
) -> Result<()> {
    let url = format!("{}/api/notes/{}", base_url, args.id);

    let note: Note = make_request(client.get(&url)).await?;

    output(&note, human)
}
