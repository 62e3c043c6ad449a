//! Listing parameters: search, sort, and pagination.
//!
//! Sort fields are an enumerated allow-list. Callers hand in whatever string
//! arrived on the wire; it is resolved to a [`SortField`] here and only the
//! fixed expression from [`SortField::order_expr`] ever reaches SQL text.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::types::Note;
use crate::validation::FieldErrors;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Column a note listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Resolve a caller-supplied sort field. Unknown or absent values fall
    /// back to `CreatedAt`.
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("title") => Self::Title,
            Some("updatedat" | "updated_at") => Self::UpdatedAt,
            _ => Self::CreatedAt,
        }
    }

    /// SQL expression for `ORDER BY`. Titles compare bytewise.
    #[must_use]
    pub const fn order_expr(self) -> &'static str {
        match self {
            Self::Title => "title COLLATE \"C\"",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn compare(self, a: &Note, b: &Note) -> Ordering {
        match self {
            Self::Title => a.title.cmp(&b.title),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// Direction of a note listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Resolve a caller-supplied direction. Anything but `asc` is `Desc`.
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Offset pagination. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    /// Build pagination from optional request values.
    ///
    /// Returns `Ok(None)` unless both values are present; pagination is then
    /// not applied. Values below 1, or a page size above [`MAX_PAGE_SIZE`],
    /// are validation failures.
    pub fn from_parts(
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Option<Self>, FieldErrors> {
        let mut errors = FieldErrors::default();
        if let Some(p) = page {
            if p < 1 {
                errors.add("page", "page must be at least 1");
            } else if p > i64::from(u32::MAX) {
                errors.add("page", "page is out of range");
            }
        }
        if let Some(s) = page_size {
            if s < 1 {
                errors.add("pageSize", "pageSize must be at least 1");
            } else if s > i64::from(MAX_PAGE_SIZE) {
                errors.add("pageSize", format!("pageSize must be at most {MAX_PAGE_SIZE}"));
            }
        }
        errors.into_result()?;

        Ok(match (page, page_size) {
            (Some(page), Some(page_size)) => Some(Self {
                page: page as u32,
                page_size: page_size as u32,
            }),
            _ => None,
        })
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows skipped: `(page - 1) * page_size`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// Filter, order, and window for listing one owner's notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    search: Option<String>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub pagination: Option<Pagination>,
}

impl NoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring filter on title or content. Blank input
    /// clears the filter.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// The active search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Whether `note` passes the search filter.
    pub fn matches(&self, note: &Note) -> bool {
        let Some(term) = self.search_term() else {
            return true;
        };
        let needle = term.to_lowercase();
        note.title.to_lowercase().contains(&needle)
            || note
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
    }

    /// Ordering of two notes under this query, ties broken by id.
    pub fn compare(&self, a: &Note, b: &Note) -> Ordering {
        let ord = self.sort_field.compare(a, b).then_with(|| a.id.cmp(&b.id));
        match self.sort_direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::OwnerId;
    use crate::types::{NoteId, now};

    fn note(title: &str, content: Option<&str>) -> Note {
        let ts = now();
        Note {
            id: NoteId::new(),
            owner_id: OwnerId::new("u1").unwrap(),
            title: title.to_string(),
            content: content.map(String::from),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn sort_field_allow_list() {
        assert_eq!(SortField::parse_lenient(Some("title")), SortField::Title);
        assert_eq!(SortField::parse_lenient(Some("TITLE")), SortField::Title);
        assert_eq!(SortField::parse_lenient(Some("updatedAt")), SortField::UpdatedAt);
        assert_eq!(SortField::parse_lenient(Some("updated_at")), SortField::UpdatedAt);
        assert_eq!(SortField::parse_lenient(Some("createdAt")), SortField::CreatedAt);
        assert_eq!(SortField::parse_lenient(None), SortField::CreatedAt);
        assert_eq!(
            SortField::parse_lenient(Some("title; DROP TABLE notes")),
            SortField::CreatedAt
        );
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(SortDirection::parse_lenient(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient(Some("ASC")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient(Some("sideways")), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient(None), SortDirection::Desc);
    }

    #[test]
    fn pagination_requires_both_values() {
        assert_eq!(Pagination::from_parts(Some(2), None).unwrap(), None);
        assert_eq!(Pagination::from_parts(None, Some(10)).unwrap(), None);
        assert_eq!(Pagination::from_parts(None, None).unwrap(), None);

        let p = Pagination::from_parts(Some(2), Some(10)).unwrap().unwrap();
        assert_eq!(p.offset(), 10);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn pagination_rejects_out_of_range() {
        assert!(Pagination::from_parts(Some(0), Some(10)).is_err());
        assert!(Pagination::from_parts(Some(1), Some(0)).is_err());
        assert!(Pagination::from_parts(Some(-3), None).is_err());
        let err = Pagination::from_parts(Some(1), Some(i64::from(MAX_PAGE_SIZE) + 1)).unwrap_err();
        assert!(err.fields().contains_key("pageSize"));
    }

    #[test]
    fn blank_search_is_no_filter() {
        let q = NoteQuery::new().search("   ");
        assert_eq!(q.search_term(), None);
        assert!(q.matches(&note("anything", None)));
    }

    #[test]
    fn search_matches_title_or_content_case_insensitively() {
        let q = NoteQuery::new().search("MILK");
        assert!(q.matches(&note("Groceries", Some("milk, eggs"))));
        assert!(q.matches(&note("Buttermilk pancakes", None)));
        assert!(!q.matches(&note("Errands", Some("post office"))));
        assert!(!q.matches(&note("Errands", None)));
    }

    #[test]
    fn compare_orders_by_title() {
        let q = NoteQuery::new().sort(SortField::Title, SortDirection::Asc);
        let mut notes = vec![note("b", None), note("c", None), note("a", None)];
        notes.sort_by(|a, b| q.compare(a, b));
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);

        let q = NoteQuery::new().sort(SortField::Title, SortDirection::Desc);
        notes.sort_by(|a, b| q.compare(a, b));
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["c", "b", "a"]);
    }
}
