//! LIST command - List the caller's notes.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_core::Note;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, format_timestamp, make_request, output, truncate};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive text to find in titles or content
    #[arg(long, short)]
    pub search: Option<String>,

    /// Sort field: title, createdAt, updatedAt
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long)]
    pub sort_order: Option<String>,

    /// Page number, starting at 1 (requires --page-size)
    #[arg(long)]
    pub page: Option<u32>,

    /// Notes per page, at most 100 (requires --page)
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl ListArgs {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sortBy", sort_by.clone()));
        }
        if let Some(sort_order) = &self.sort_order {
            query.push(("sortOrder", sort_order.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        query
    }
}

/// Response from listing notes.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesResponse {
    pub notes: Vec<Note>,
    pub total_count: u64,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl HumanReadable for ListNotesResponse {
    fn print_human(&self) {
        println!("{}", "Notes".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }

        for note in &self.notes {
            println!("  {}", truncate(&note.title, 60).bold());
            println!("    {} {}", "ID:".cyan(), note.id);
            println!("    {} {}", "Updated:".cyan(), format_timestamp(&note.updated_at));
            if let Some(content) = &note.content {
                let first_line = content.lines().next().unwrap_or_default();
                println!("    {}", truncate(first_line, 70).dimmed());
            }
            println!();
        }

        match (self.page, self.page_size) {
            (Some(page), Some(page_size)) => println!(
                "  {} {} of {} (page {}, {} per page)",
                "Showing:".cyan(),
                self.notes.len(),
                self.total_count,
                page,
                page_size
            ),
            _ => println!("  {} {}", "Total:".cyan(), self.total_count),
        }
    }
}

/// Execute the list command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ListArgs,
) -> Result<()> {
    let url = format!("{}/api/notes", base_url);

    let response: ListNotesResponse = make_request(client.get(&url).query(&args.query())).await?;

    output(&response, human)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_uses_wire_names() {
        let args = ListArgs {
            search: Some("milk".into()),
            sort_by: Some("title".into()),
            sort_order: None,
            page: Some(2),
            page_size: Some(10),
        };
        assert_eq!(
            args.query(),
            vec![
                ("search", "milk".to_string()),
                ("sortBy", "title".to_string()),
                ("page", "2".to_string()),
                ("pageSize", "10".to_string()),
            ]
        );
    }
}
