//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use shelf_core::{Bookmark, Category};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single bookmark
    ///
    /// `categories` is used to show category names instead of ids.
    pub fn print_bookmark(&self, bookmark: &Bookmark, categories: &[Category]) {
        let data = &bookmark.data;
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", bookmark.id);
                println!("Title:       {}", data.title);
                println!("URL:         {}", data.url);
                if let Some(ref desc) = data.description {
                    println!("Description: {}", desc);
                }
                if !data.category_ids.is_empty() {
                    println!(
                        "Categories:  {}",
                        category_names(&data.category_ids, categories).join(", ")
                    );
                }
                if !data.tags.is_empty() {
                    println!("Tags:        {}", data.tags.join(", "));
                }
                if let Some(ref metadata) = data.metadata {
                    if let Some(ref site) = metadata.site_name {
                        println!("Site:        {}", site);
                    }
                    if let Some(ref author) = metadata.author {
                        println!("Author:      {}", author);
                    }
                    if let Some(minutes) = metadata.reading_time {
                        println!("Reading:     {} min", minutes);
                    }
                }
                if data.is_archived() {
                    println!("Archived:    yes");
                }
                if data.visits() > 0 {
                    println!("Visits:      {}", data.visits());
                }
                println!("Created:     {}", bookmark.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:     {}", bookmark.updated_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => print_json(bookmark),
            OutputFormat::Quiet => {
                println!("{}", bookmark.id);
            }
        }
    }

    /// Print a list of bookmarks
    pub fn print_bookmarks(&self, bookmarks: &[Bookmark]) {
        match self.format {
            OutputFormat::Human => {
                if bookmarks.is_empty() {
                    println!("No bookmarks found.");
                    return;
                }
                for bookmark in bookmarks {
                    let archived = if bookmark.data.is_archived() { " [archived]" } else { "" };
                    println!(
                        "{} | {}{} | {}",
                        short_id(&bookmark.id),
                        truncate(&bookmark.data.title, 35),
                        archived,
                        truncate(&bookmark.data.url, 45)
                    );
                }
                println!("\n{} bookmark(s)", bookmarks.len());
            }
            OutputFormat::Json => print_json(&bookmarks),
            OutputFormat::Quiet => {
                for bookmark in bookmarks {
                    println!("{}", bookmark.id);
                }
            }
        }
    }

    /// Print a single category with the number of bookmarks in it
    pub fn print_category(&self, category: &Category, bookmark_count: usize) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", category.id);
                println!("Name:        {}", category.data.name);
                if let Some(ref desc) = category.data.description {
                    println!("Description: {}", desc);
                }
                if let Some(ref color) = category.data.color {
                    println!("Color:       {}", color);
                }
                if let Some(ref icon) = category.data.icon {
                    println!("Icon:        {}", icon);
                }
                println!("Order:       {}", category.data.order);
                println!("Bookmarks:   {}", bookmark_count);
            }
            OutputFormat::Json => print_json(category),
            OutputFormat::Quiet => {
                println!("{}", category.id);
            }
        }
    }

    /// Print categories with their bookmark counts
    pub fn print_categories(&self, categories: &[(Category, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if categories.is_empty() {
                    println!("No categories found.");
                    return;
                }
                for (category, count) in categories {
                    println!(
                        "{} | {} ({})",
                        short_id(&category.id),
                        truncate(&category.data.name, 40),
                        count
                    );
                }
                println!("\n{} category(ies)", categories.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = categories
                    .iter()
                    .map(|(category, count)| {
                        let mut value = serde_json::to_value(category).unwrap_or_default();
                        value["bookmarkCount"] = serde_json::json!(count);
                        value
                    })
                    .collect();
                print_json(&json);
            }
            OutputFormat::Quiet => {
                for (category, _) in categories {
                    println!("{}", category.id);
                }
            }
        }
    }

    /// Print a list of tags
    pub fn print_tags(&self, tags: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for (name, count) in tags {
                    println!("{} ({})", name, count);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = tags
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json_tags);
            }
            OutputFormat::Quiet => {
                for (name, _) in tags {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// Names for category ids, falling back to the id for unknown categories
fn category_names(ids: &[String], categories: &[Category]) -> Vec<String> {
    ids.iter()
        .map(|id| {
            categories
                .iter()
                .find(|c| &c.id == id)
                .map(|c| c.data.name.clone())
                .unwrap_or_else(|| id.clone())
        })
        .collect()
}

/// First 8 characters of an id
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
