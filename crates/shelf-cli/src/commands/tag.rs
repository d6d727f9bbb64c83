//! Tag command handlers

use anyhow::Result;

use shelf_core::BookmarkContext;

use crate::output::Output;

/// List all tags with usage counts
pub fn list(context: &BookmarkContext, output: &Output) -> Result<()> {
    output.print_tags(&context.tag_counts());
    Ok(())
}
