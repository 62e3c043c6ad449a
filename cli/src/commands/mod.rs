//! Command implementations for the notes CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod create;
pub mod delete;
pub mod list;
pub mod login;
pub mod register;
pub mod show;
pub mod update;

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use notes_core::Note;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Header carrying the caller id when the server runs in header mode.
const USER_ID_HEADER: &str = "X-User-Id";

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// How the client identifies itself to the server.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

/// Build an HTTP client with the caller's identity as default headers.
///
/// A token wins over a user id when both are given.
pub fn build_client(credentials: &Credentials) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();

    if let Some(token) = &credentials.token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| anyhow::anyhow!("Invalid token value: {}", e))?;
        headers.insert(AUTHORIZATION, value);
    } else if let Some(user_id) = &credentials.user_id {
        let value = HeaderValue::from_str(user_id)
            .map_err(|e| anyhow::anyhow!("Invalid user id value: {}", e))?;
        headers.insert(USER_ID_HEADER, value);
    }

    Ok(reqwest::Client::builder().default_headers(headers).build()?)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

impl HumanReadable for Note {
    fn print_human(&self) {
        println!("{}", self.title.bold());
        println!("{}", "=".repeat(60));
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.created_at));
        println!("  {} {}", "Updated:".cyan(), format_timestamp(&self.updated_at));
        println!();
        match &self.content {
            Some(content) if !content.is_empty() => println!("{}", content),
            _ => println!("  {}", "(no content)".dimmed()),
        }
    }
}

/// Success envelope returned by the server.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Send a request and unwrap the `data` field of the success envelope.
pub async fn make_request<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = send(request).await?;
    let envelope = response.json::<Envelope<T>>().await?;
    Ok(envelope.data)
}

/// Send a request whose success response has no body.
pub async fn make_empty_request(request: reqwest::RequestBuilder) -> Result<(), CliError> {
    send(request).await.map(|_| ())
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CliError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extract a readable message from an error envelope, falling back to the raw body.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    let error = &json["error"];
    let Some(message) = error["message"].as_str() else {
        return body.to_string();
    };

    let mut message = message.to_string();
    if let Some(fields) = error["fields"].as_object() {
        for (field, problems) in fields {
            let problems: Vec<&str> = problems
                .as_array()
                .map(|p| p.iter().filter_map(|v| v.as_str()).collect())
                .unwrap_or_default();
            message.push_str(&format!("\n  {}: {}", field, problems.join("; ")));
        }
    }
    message
}

/// Format a timestamp for human display.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"success":false,"error":{"code":"NOT_FOUND","message":"Note not found"}}"#;
        assert_eq!(error_message(body), "Note not found");
    }

    #[test]
    fn test_error_message_lists_fields() {
        let body = r#"{"success":false,"error":{"code":"VALIDATION_FAILED","message":"Invalid request data","fields":{"title":["title is required"]}}}"#;
        assert_eq!(
            error_message(body),
            "Invalid request data\n  title: title is required"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"oops":1}"#), r#"{"oops":1}"#);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_build_client_accepts_credentials() {
        assert!(build_client(&Credentials::default()).is_ok());
        assert!(
            build_client(&Credentials {
                token: Some("abc".into()),
                user_id: None
            })
            .is_ok()
        );
        assert!(
            build_client(&Credentials {
                token: None,
                user_id: Some("bad\nvalue".into())
            })
            .is_err()
        );
    }
}
