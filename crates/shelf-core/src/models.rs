//! Data models for SHELF
//!
//! Defines the persisted entities, Bookmark and Category, along with the
//! payloads used to create them (drafts) and to change them (patches).
//! Field names serialize in camelCase so the stored JSON matches the
//! layout the browser client writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted record: identity, audit timestamps and a kind-specific payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entity<T> {
    /// Unique identifier, assigned on creation and never changed
    pub id: String,
    /// When this entity was created
    pub created_at: DateTime<Utc>,
    /// When this entity was last saved
    pub updated_at: DateTime<Utc>,
    /// Kind-specific fields
    #[serde(flatten)]
    pub data: T,
}

/// A saved bookmark
pub type Bookmark = Entity<BookmarkData>;

/// A category bookmarks can belong to
pub type Category = Entity<CategoryData>;

impl<T> Entity<T> {
    /// Build a freshly created entity with a new id and `created_at == updated_at`
    pub(crate) fn create(data: T, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            created_at: now,
            updated_at: now,
            data,
        }
    }
}

/// Generate a random, collision-resistant entity id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Input to an upsert: an optional id plus the payload
///
/// Without an id (or with an id no stored record has) the save creates a new
/// entity. With a known id it replaces that entity's payload wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<T> {
    pub id: Option<String>,
    pub data: T,
}

impl<T> Draft<T> {
    /// Draft that always creates
    pub fn new(data: T) -> Self {
        Self { id: None, data }
    }

    /// Draft targeting a specific id
    pub fn with_id(id: impl Into<String>, data: T) -> Self {
        Self {
            id: Some(id.into()),
            data,
        }
    }
}

impl<T> From<Entity<T>> for Draft<T> {
    fn from(entity: Entity<T>) -> Self {
        Self {
            id: Some(entity.id),
            data: entity.data,
        }
    }
}

/// Bookmark fields other than the base entity fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkData {
    /// The URL
    pub url: String,
    /// Display title
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Categories this bookmark belongs to
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BookmarkMetadata>,
    /// Free-form tags, unique per bookmark
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_count: Option<u64>,
}

impl BookmarkData {
    /// Create a bookmark payload with the two required fields
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Remove a tag
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Set all tags (replacing existing), dropping duplicates
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = dedup_preserving_order(tags);
    }

    /// Check whether the bookmark carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Put the bookmark into a category
    pub fn add_category(&mut self, category_id: impl Into<String>) {
        let category_id = category_id.into();
        if !self.category_ids.contains(&category_id) {
            self.category_ids.push(category_id);
        }
    }

    /// Check whether the bookmark references a category
    pub fn in_category(&self, category_id: &str) -> bool {
        self.category_ids.iter().any(|c| c == category_id)
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived.unwrap_or(false)
    }

    pub fn visits(&self) -> u64 {
        self.visit_count.unwrap_or(0)
    }

    /// Drop duplicate tags and category ids, keeping first occurrences
    pub(crate) fn normalize(&mut self) {
        self.tags = dedup_preserving_order(std::mem::take(&mut self.tags));
        self.category_ids = dedup_preserving_order(std::mem::take(&mut self.category_ids));
    }
}

/// Informational metadata about the linked page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// Estimated reading time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Category fields other than the base entity fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    /// Display name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Position among sibling categories
    #[serde(default)]
    pub order: i64,
    /// Reserved for nested categories; not enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl CategoryData {
    /// Create a category payload with the given name at order 0
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the display order
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }
}

/// A partial update to a bookmark
///
/// `None` leaves a field untouched. For optional fields, `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub favicon: Option<Option<String>>,
    pub category_ids: Option<Vec<String>>,
    pub metadata: Option<Option<BookmarkMetadata>>,
    pub tags: Option<Vec<String>>,
    pub is_archived: Option<Option<bool>>,
    pub visit_count: Option<Option<u64>>,
}

impl BookmarkPatch {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn favicon(mut self, favicon: Option<String>) -> Self {
        self.favicon = Some(favicon);
        self
    }

    pub fn category_ids(mut self, category_ids: Vec<String>) -> Self {
        self.category_ids = Some(category_ids);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.is_archived = Some(Some(archived));
        self
    }

    pub fn visit_count(mut self, count: u64) -> Self {
        self.visit_count = Some(Some(count));
        self
    }

    /// True if applying this patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch over an existing payload
    pub fn apply(self, data: &mut BookmarkData) {
        if let Some(url) = self.url {
            data.url = url;
        }
        if let Some(title) = self.title {
            data.title = title;
        }
        if let Some(description) = self.description {
            data.description = description;
        }
        if let Some(favicon) = self.favicon {
            data.favicon = favicon;
        }
        if let Some(category_ids) = self.category_ids {
            data.category_ids = category_ids;
        }
        if let Some(metadata) = self.metadata {
            data.metadata = metadata;
        }
        if let Some(tags) = self.tags {
            data.set_tags(tags);
        }
        if let Some(is_archived) = self.is_archived {
            data.is_archived = is_archived;
        }
        if let Some(visit_count) = self.visit_count {
            data.visit_count = visit_count;
        }
    }
}

/// A partial update to a category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<Option<String>>,
    pub icon: Option<Option<String>>,
    pub order: Option<i64>,
    pub parent_id: Option<Option<String>>,
}

impl CategoryPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch over an existing payload
    pub fn apply(self, data: &mut CategoryData) {
        if let Some(name) = self.name {
            data.name = name;
        }
        if let Some(description) = self.description {
            data.description = description;
        }
        if let Some(color) = self.color {
            data.color = color;
        }
        if let Some(icon) = self.icon {
            data.icon = icon;
        }
        if let Some(order) = self.order {
            data.order = order;
        }
        if let Some(parent_id) = self.parent_id {
            data.parent_id = parent_id;
        }
    }
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
