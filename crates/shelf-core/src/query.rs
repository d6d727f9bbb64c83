//! Bookmark filtering and sorting
//!
//! Pure functions over slices of bookmarks, used by the context to answer
//! "which bookmarks should be shown, in what order".

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Bookmark;

/// Criteria a bookmark must meet to be listed
///
/// Every set criterion must match; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkFilter {
    /// Case-insensitive substring of the title, URL or any tag
    pub query: Option<String>,
    /// Category the bookmark must belong to
    pub category_id: Option<String>,
    /// Tags the bookmark must all carry
    pub tags: Vec<String>,
    /// Archived state to match; `None` matches both
    pub archived: Option<bool>,
    /// Inclusive lower bound on `created_at`
    pub created_after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub created_before: Option<DateTime<Utc>>,
}

impl BookmarkFilter {
    /// Check a single bookmark against the filter
    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        let data = &bookmark.data;

        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let needle = query.to_lowercase();
            let hit = data.title.to_lowercase().contains(&needle)
                || data.url.to_lowercase().contains(&needle)
                || data.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(ref category_id) = self.category_id {
            if !data.in_category(category_id) {
                return false;
            }
        }

        if !self.tags.iter().all(|tag| data.has_tag(tag)) {
            return false;
        }

        if let Some(archived) = self.archived {
            if data.is_archived() != archived {
                return false;
            }
        }

        if let Some(after) = self.created_after {
            if bookmark.created_at < after {
                return false;
            }
        }

        if let Some(before) = self.created_before {
            if bookmark.created_at > before {
                return false;
            }
        }

        true
    }
}

/// Field to sort bookmarks by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Created,
    Updated,
    Title,
    VisitCount,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(SortKey::Created),
            "updated" => Ok(SortKey::Updated),
            "title" => Ok(SortKey::Title),
            "visits" | "visitcount" | "visit_count" => Ok(SortKey::VisitCount),
            other => Err(format!(
                "unknown sort key '{}' (expected created, updated, title or visits)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Created => "created",
            SortKey::Updated => "updated",
            SortKey::Title => "title",
            SortKey::VisitCount => "visits",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort order for listings; newest first by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    fn compare(&self, a: &Bookmark, b: &Bookmark) -> Ordering {
        let ordering = match self.key {
            SortKey::Created => a.created_at.cmp(&b.created_at),
            SortKey::Updated => a.updated_at.cmp(&b.updated_at),
            SortKey::Title => a
                .data
                .title
                .to_lowercase()
                .cmp(&b.data.title.to_lowercase()),
            SortKey::VisitCount => a.data.visits().cmp(&b.data.visits()),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Sort in place; ties keep their existing relative order
    pub fn sort(&self, bookmarks: &mut [Bookmark]) {
        bookmarks.sort_by(|a, b| self.compare(a, b));
    }
}

/// Filter then sort, returning owned copies
pub fn select(bookmarks: &[Bookmark], filter: &BookmarkFilter, order: SortOrder) -> Vec<Bookmark> {
    let mut selected: Vec<Bookmark> = bookmarks
        .iter()
        .filter(|b| filter.matches(b))
        .cloned()
        .collect();
    order.sort(&mut selected);
    selected
}

/// Every tag in use with the number of bookmarks carrying it, by tag name
pub fn tag_counts(bookmarks: &[Bookmark]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for bookmark in bookmarks {
        for tag in &bookmark.data.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect()
}
