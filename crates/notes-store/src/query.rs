//! SQL construction for owner-scoped note listings.
//!
//! Every statement built here starts with `WHERE owner_id = $1`. Search terms,
//! owners, limits and offsets are bound parameters; the only text spliced into
//! the statement is the fixed sort expression and direction keyword taken
//! from the `SortField` / `SortDirection` enums.

use notes_core::{NoteQuery, OwnerId};
use sqlx::{Postgres, QueryBuilder};

use crate::models::NOTE_COLUMNS;

/// `ILIKE` pattern matching `term` anywhere, with `%`, `_` and `\` escaped.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, owner: &OwnerId, search: Option<&str>) {
    builder.push(" WHERE owner_id = ");
    builder.push_bind(owner.as_str().to_string());

    if let Some(term) = search {
        let pattern = like_pattern(term);
        builder.push(" AND (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(r" ESCAPE '\' OR content ILIKE ");
        builder.push_bind(pattern);
        builder.push(r" ESCAPE '\')");
    }
}

/// `SELECT` for one page (or all) of an owner's notes.
pub fn list_query(owner: &OwnerId, query: &NoteQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {NOTE_COLUMNS} FROM notes"));
    push_filter(&mut builder, owner, query.search_term());

    let direction = query.sort_direction.keyword();
    builder.push(format!(
        " ORDER BY {} {direction}, id {direction}",
        query.sort_field.order_expr()
    ));

    if let Some(page) = query.pagination {
        builder.push(" LIMIT ");
        builder.push_bind(page.limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());
    }

    builder
}

/// `SELECT COUNT(*)` with the same filter as [`list_query`], no window.
pub fn count_query(owner: &OwnerId, query: &NoteQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM notes");
    push_filter(&mut builder, owner, query.search_term());
    builder
}
