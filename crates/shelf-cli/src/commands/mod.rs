//! Command handlers

pub mod bookmark;
pub mod category;
pub mod config;
pub mod status;
pub mod tag;

use anyhow::{bail, Result};

use shelf_core::BookmarkContext;

/// Resolve a bookmark id (supports full id or prefix)
pub fn resolve_bookmark_id(context: &BookmarkContext, id: &str) -> Result<String> {
    let bookmarks = context.bookmarks();
    let candidates: Vec<(&str, &str)> = bookmarks
        .iter()
        .map(|b| (b.id.as_str(), b.data.title.as_str()))
        .collect();
    resolve_id("bookmark", &candidates, id)
}

/// Resolve a category by full id, id prefix or exact name (case-insensitive)
pub fn resolve_category_id(context: &BookmarkContext, id_or_name: &str) -> Result<String> {
    let categories = context.categories();

    let by_name: Vec<_> = categories
        .iter()
        .filter(|c| c.data.name.eq_ignore_ascii_case(id_or_name))
        .collect();
    if by_name.len() == 1 && !categories.iter().any(|c| c.id == id_or_name) {
        return Ok(by_name[0].id.clone());
    }

    let candidates: Vec<(&str, &str)> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.data.name.as_str()))
        .collect();
    resolve_id("category", &candidates, id_or_name)
}

fn resolve_id(kind: &str, candidates: &[(&str, &str)], id: &str) -> Result<String> {
    if id.is_empty() {
        bail!("No {} id given", kind);
    }

    // Exact id first
    if let Some((exact, _)) = candidates.iter().find(|(candidate, _)| *candidate == id) {
        return Ok(exact.to_string());
    }

    let matches: Vec<_> = candidates
        .iter()
        .filter(|(candidate, _)| candidate.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No {} found matching: {}", kind, id),
        1 => Ok(matches[0].0.to_string()),
        _ => {
            eprintln!("Multiple {}s match '{}':", kind, id);
            for (candidate, label) in &matches {
                eprintln!("  {} - {}", candidate, label);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Split comma-separated values and drop blanks
pub fn split_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
