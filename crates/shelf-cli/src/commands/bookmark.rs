//! Bookmark command handlers

use anyhow::{bail, Context, Result};
use clap::Args;
use url::Url;

use shelf_core::{
    BookmarkContext, BookmarkData, BookmarkFilter, BookmarkPatch, SortDirection, SortKey,
    SortOrder,
};

use super::{resolve_bookmark_id, resolve_category_id, split_list};
use crate::output::Output;
use crate::prompt::confirm;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// URL to save
    pub url: String,
    /// Display title
    #[arg(short = 'T', long)]
    pub title: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Favicon URL
    #[arg(long)]
    pub favicon: Option<String>,
    /// Category id, id prefix or name (repeatable)
    #[arg(short, long)]
    pub category: Vec<String>,
    /// Tags to add (repeatable or comma-separated)
    #[arg(short, long)]
    pub tag: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Match title, URL or tags (case-insensitive)
    #[arg(long)]
    pub query: Option<String>,
    /// Only bookmarks in this category (id, prefix or name)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only bookmarks carrying all of these tags
    #[arg(short, long)]
    pub tag: Vec<String>,
    /// Show only archived bookmarks
    #[arg(long, conflicts_with = "all")]
    pub archived: bool,
    /// Show archived and active bookmarks
    #[arg(long)]
    pub all: bool,
    /// Sort by created, updated, title or visits
    #[arg(long, default_value_t = SortKey::Created)]
    pub sort: SortKey,
    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Bookmark ID (full id or prefix)
    pub id: String,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(short = 'T', long)]
    pub title: Option<String>,
    /// New description; an empty value clears it
    #[arg(short, long)]
    pub description: Option<String>,
    /// New favicon URL; an empty value clears it
    #[arg(long)]
    pub favicon: Option<String>,
    /// Replace categories (repeatable)
    #[arg(short, long)]
    pub category: Vec<String>,
    /// Remove the bookmark from every category
    #[arg(long, conflicts_with = "category")]
    pub no_category: bool,
    /// Replace tags (repeatable or comma-separated)
    #[arg(short, long)]
    pub tag: Vec<String>,
    /// Add tags, keeping the existing ones
    #[arg(long, conflicts_with = "tag")]
    pub add_tag: Vec<String>,
    /// Remove tags
    #[arg(long, conflicts_with = "tag")]
    pub remove_tag: Vec<String>,
}

/// Create a new bookmark
pub async fn add(context: &BookmarkContext, args: AddArgs, output: &Output) -> Result<()> {
    let url = validate_url(&args.url)?;
    let title = validate_title(&args.title)?;

    let mut data = BookmarkData::new(url, title);
    data.description = non_empty(args.description);
    data.favicon = non_empty(args.favicon);
    for category in &args.category {
        data.add_category(resolve_category_id(context, category)?);
    }
    data.set_tags(split_list(&args.tag));

    let bookmark = context
        .add_bookmark(data)
        .await
        .context("Failed to create bookmark")?;

    output.success(&format!("Created bookmark: {}", bookmark.id));
    output.print_bookmark(&bookmark, &context.categories());

    Ok(())
}

/// List bookmarks matching the filter flags
pub fn list(context: &BookmarkContext, args: ListArgs, output: &Output) -> Result<()> {
    let category_id = match args.category {
        Some(ref category) => Some(resolve_category_id(context, category)?),
        None => None,
    };

    let filter = BookmarkFilter {
        query: args.query,
        category_id,
        tags: split_list(&args.tag),
        archived: archived_filter(args.archived, args.all),
        ..Default::default()
    };
    let direction = if args.asc {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };

    let bookmarks = context.find_bookmarks(&filter, SortOrder::new(args.sort, direction));
    output.print_bookmarks(&bookmarks);
    Ok(())
}

/// Show a single bookmark
pub fn show(context: &BookmarkContext, id: String, output: &Output) -> Result<()> {
    let id = resolve_bookmark_id(context, &id)?;

    let bookmark = context
        .bookmark(&id)
        .ok_or_else(|| anyhow::anyhow!("Bookmark not found: {}", id))?;

    output.print_bookmark(&bookmark, &context.categories());
    Ok(())
}

/// Edit a bookmark's fields
pub async fn edit(context: &BookmarkContext, args: EditArgs, output: &Output) -> Result<()> {
    let id = resolve_bookmark_id(context, &args.id)?;
    let current = context
        .bookmark(&id)
        .ok_or_else(|| anyhow::anyhow!("Bookmark not found: {}", id))?;

    let mut patch = BookmarkPatch::default();

    if let Some(ref url) = args.url {
        patch = patch.url(validate_url(url)?);
    }
    if let Some(ref title) = args.title {
        patch = patch.title(validate_title(title)?);
    }
    if args.description.is_some() {
        patch = patch.description(non_empty(args.description));
    }
    if args.favicon.is_some() {
        patch = patch.favicon(non_empty(args.favicon));
    }

    if args.no_category {
        patch = patch.category_ids(Vec::new());
    } else if !args.category.is_empty() {
        let category_ids = args
            .category
            .iter()
            .map(|c| resolve_category_id(context, c))
            .collect::<Result<Vec<_>>>()?;
        patch = patch.category_ids(category_ids);
    }

    if !args.tag.is_empty() {
        patch = patch.tags(split_list(&args.tag));
    } else if !args.add_tag.is_empty() || !args.remove_tag.is_empty() {
        let mut data = current.data.clone();
        for tag in split_list(&args.add_tag) {
            data.add_tag(tag);
        }
        for tag in split_list(&args.remove_tag) {
            data.remove_tag(&tag);
        }
        patch = patch.tags(data.tags);
    }

    if patch.is_empty() {
        bail!("Nothing to change. Pass at least one field flag (see --help).");
    }

    let bookmark = context
        .update_bookmark(&id, patch)
        .await
        .context("Failed to update bookmark")?;

    output.success("Bookmark updated");
    output.print_bookmark(&bookmark, &context.categories());

    Ok(())
}

/// Archive or unarchive a bookmark
pub async fn archive(
    context: &BookmarkContext,
    id: String,
    undo: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_bookmark_id(context, &id)?;

    let bookmark = context
        .set_archived(&id, !undo)
        .await
        .context("Failed to update bookmark")?;

    if undo {
        output.success(&format!("Unarchived: {}", bookmark.data.title));
    } else {
        output.success(&format!("Archived: {}", bookmark.data.title));
    }

    Ok(())
}

/// Record a visit to a bookmark and print its URL
pub async fn visit(context: &BookmarkContext, id: String, output: &Output) -> Result<()> {
    let id = resolve_bookmark_id(context, &id)?;

    let bookmark = context
        .record_visit(&id)
        .await
        .context("Failed to record visit")?;

    if output.is_quiet() {
        println!("{}", bookmark.data.url);
    } else {
        output.message(&bookmark.data.url);
        output.success(&format!(
            "{} visit(s) to {}",
            bookmark.data.visits(),
            bookmark.data.title
        ));
    }

    Ok(())
}

/// Delete a bookmark
pub async fn delete(
    context: &BookmarkContext,
    id: String,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_bookmark_id(context, &id)?;

    let bookmark = context
        .bookmark(&id)
        .ok_or_else(|| anyhow::anyhow!("Bookmark not found: {}", id))?;

    // Confirm deletion
    if output.should_prompt() && !yes {
        println!("Delete bookmark: {} - {}", bookmark.id, bookmark.data.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    context
        .remove_bookmark(&id)
        .await
        .context("Failed to delete bookmark")?;

    output.success(&format!("Deleted bookmark: {}", id));

    Ok(())
}

/// Active bookmarks by default; `--archived` for archived only, `--all` for both
fn archived_filter(archived: bool, all: bool) -> Option<bool> {
    if all {
        None
    } else {
        Some(archived)
    }
}

/// Require an absolute URL
fn validate_url(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        bail!("URL is required");
    }
    Url::parse(input).with_context(|| format!("Invalid URL: {}", input))?;
    Ok(input.to_string())
}

fn validate_title(input: &str) -> Result<String> {
    let title = input.trim();
    if title.is_empty() {
        bail!("Title is required");
    }
    Ok(title.to_string())
}

/// Trimmed value, or `None` if blank
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
