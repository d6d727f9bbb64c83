//! Status command handler

use anyhow::{Context, Result};

use shelf_core::storage::keys;
use shelf_core::{BookmarkContext, Config};

use crate::output::{Output, OutputFormat};

/// Show status information
pub async fn show(context: &BookmarkContext, config: &Config, output: &Output) -> Result<()> {
    let store = config.file_store();
    let total_size = store
        .size_of(&[keys::BOOKMARKS, keys::CATEGORIES])
        .await
        .context("Failed to read storage size")?;

    let bookmarks = context.bookmarks();
    let archived = bookmarks.iter().filter(|b| b.data.is_archived()).count();
    let categories = context.categories().len();
    let tags = context.tag_counts().len();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "storage": {
                        "bookmarks_exists": config.bookmarks_path().exists(),
                        "categories_exists": config.categories_path().exists(),
                        "total_size": total_size
                    },
                    "counts": {
                        "bookmarks": bookmarks.len(),
                        "archived": archived,
                        "categories": categories,
                        "tags": tags
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", bookmarks.len());
        }
        OutputFormat::Human => {
            println!("SHELF Status");
            println!("============");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Size:     {}", human_size(total_size));
            println!();
            println!("Contents:");
            println!(
                "  Bookmarks:  {} ({} archived)",
                bookmarks.len(),
                archived
            );
            println!("  Categories: {}", categories);
            println!("  Tags:       {}", tags);
        }
    }

    Ok(())
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
