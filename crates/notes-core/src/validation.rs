//! Input validation for notes and account registration.
//!
//! Validated inputs are separate types: a [`NoteInput`] or [`Registration`]
//! can only be obtained through its checking constructor, so the store never
//! sees an empty title or an oversized body.

use std::collections::BTreeMap;
use std::fmt;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum content length in characters.
pub const MAX_CONTENT_LEN: usize = 10_000;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Per-field validation messages, keyed by the wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Record a problem with `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for messages in self.fields.values() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                f.write_str(message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Title and content for creating or overwriting a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    title: String,
    content: Option<String>,
}

impl NoteInput {
    /// Validate a note body. The title is stored trimmed.
    pub fn new(title: impl AsRef<str>, content: Option<String>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = title.as_ref().trim();
        if title.is_empty() {
            errors.add("title", "title is required");
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.add(
                "title",
                format!("title must be at most {MAX_TITLE_LEN} characters"),
            );
        }

        if let Some(content) = &content {
            if content.chars().count() > MAX_CONTENT_LEN {
                errors.add(
                    "content",
                    format!("content must be at most {MAX_CONTENT_LEN} characters"),
                );
            }
        }

        errors.into_result()?;
        Ok(Self {
            title: title.to_string(),
            content,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

/// A checked registration request. The password is still plaintext here and
/// must be hashed before anything is persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    email: String,
    password: String,
}

impl Registration {
    /// Validate registration fields. The email is lowercased.
    pub fn new(
        username: impl AsRef<str>,
        email: impl AsRef<str>,
        password: impl Into<String>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let username = username.as_ref().trim();
        let len = username.chars().count();
        if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
            errors.add(
                "username",
                format!(
                    "username must be between {MIN_USERNAME_LEN} and {MAX_USERNAME_LEN} characters"
                ),
            );
        } else if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            errors.add(
                "username",
                "username may only contain letters, digits, '_', '.' and '-'",
            );
        }

        let email = email.as_ref().trim().to_lowercase();
        if email.len() > MAX_EMAIL_LEN {
            errors.add("email", format!("email must be at most {MAX_EMAIL_LEN} characters"));
        } else if !is_plausible_email(&email) {
            errors.add("email", "email address is invalid");
        }

        let password = password.into();
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }

        errors.into_result()?;
        Ok(Self {
            username: username.to_string(),
            email,
            password,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}
