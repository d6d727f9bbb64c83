//! Category command handlers

use anyhow::{bail, Context, Result};
use clap::Args;

use shelf_core::{BookmarkContext, BookmarkError, CategoryData, CategoryPatch};

use super::resolve_category_id;
use crate::output::Output;
use crate::prompt::confirm;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Category name
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Display color (e.g. "#3b82f6")
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    /// Position among categories; defaults to after the last one
    #[arg(long)]
    pub order: Option<i64>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Category ID, prefix or name
    pub id: String,
    #[arg(short, long)]
    pub name: Option<String>,
    /// New description; an empty value clears it
    #[arg(short, long)]
    pub description: Option<String>,
    /// New color; an empty value clears it
    #[arg(long)]
    pub color: Option<String>,
    /// New icon; an empty value clears it
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub order: Option<i64>,
}

/// Create a new category
pub async fn add(context: &BookmarkContext, args: AddArgs, output: &Output) -> Result<()> {
    let name = validate_name(&args.name)?;

    let mut data = CategoryData::new(name)
        .with_order(args.order.unwrap_or_else(|| context.next_category_order()));
    data.description = non_empty(args.description);
    data.color = non_empty(args.color);
    data.icon = non_empty(args.icon);

    let category = context
        .add_category(data)
        .await
        .context("Failed to create category")?;

    output.success(&format!("Created category: {}", category.id));
    output.print_category(&category, 0);

    Ok(())
}

/// List categories in display order with bookmark counts
pub fn list(context: &BookmarkContext, output: &Output) -> Result<()> {
    let categories: Vec<_> = context
        .categories_sorted()
        .into_iter()
        .map(|category| {
            let count = context.bookmark_count_in(&category.id);
            (category, count)
        })
        .collect();

    output.print_categories(&categories);
    Ok(())
}

/// Edit a category's fields
pub async fn edit(context: &BookmarkContext, args: EditArgs, output: &Output) -> Result<()> {
    let id = resolve_category_id(context, &args.id)?;

    let mut patch = CategoryPatch::default();
    if let Some(ref name) = args.name {
        patch = patch.name(validate_name(name)?);
    }
    if args.description.is_some() {
        patch = patch.description(non_empty(args.description));
    }
    if args.color.is_some() {
        patch = patch.color(non_empty(args.color));
    }
    if args.icon.is_some() {
        patch = patch.icon(non_empty(args.icon));
    }
    if let Some(order) = args.order {
        patch = patch.order(order);
    }

    if patch.is_empty() {
        bail!("Nothing to change. Pass at least one field flag (see --help).");
    }

    let category = context
        .update_category(&id, patch)
        .await
        .context("Failed to update category")?;

    output.success("Category updated");
    output.print_category(&category, context.bookmark_count_in(&category.id));

    Ok(())
}

/// Delete a category that no bookmark references
pub async fn delete(
    context: &BookmarkContext,
    id: String,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_category_id(context, &id)?;

    let category = context
        .category(&id)
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", id))?;

    if output.should_prompt() && !yes {
        println!("Delete category: {} - {}", category.id, category.data.name);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match context.remove_category(&id).await {
        Ok(()) => {}
        Err(e @ BookmarkError::CategoryHasBookmarks { .. }) => {
            return Err(e).with_context(|| {
                format!("Cannot delete category '{}'", category.data.name)
            });
        }
        Err(e) => return Err(e).context("Failed to delete category"),
    }

    output.success(&format!("Deleted category: {}", category.data.name));

    Ok(())
}

fn validate_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        bail!("Category name is required");
    }
    Ok(name.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use shelf_core::{BookmarkData, ErrorCode, LocalStorageAdapter};

    async fn ready_context() -> BookmarkContext {
        let context = BookmarkContext::from_adapter(LocalStorageAdapter::in_memory());
        context.load().await;
        context
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn add_args(name: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            description: None,
            color: None,
            icon: None,
            order: None,
        }
    }

    #[tokio::test]
    async fn test_add_appends_order() {
        let context = ready_context().await;

        add(&context, add_args("Reading"), &quiet()).await.unwrap();
        add(&context, add_args("Tools"), &quiet()).await.unwrap();
        add(
            &context,
            AddArgs {
                order: Some(-1),
                ..add_args("Pinned")
            },
            &quiet(),
        )
        .await
        .unwrap();

        let names: Vec<_> = context
            .categories_sorted()
            .into_iter()
            .map(|c| (c.data.name, c.data.order))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Pinned".to_string(), -1),
                ("Reading".to_string(), 0),
                ("Tools".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_requires_name() {
        let context = ready_context().await;
        assert!(add(&context, add_args("  "), &quiet()).await.is_err());
        assert!(context.categories().is_empty());
    }

    #[tokio::test]
    async fn test_edit_by_name() {
        let context = ready_context().await;
        add(
            &context,
            AddArgs {
                color: Some("#fff".to_string()),
                ..add_args("Reading")
            },
            &quiet(),
        )
        .await
        .unwrap();

        let args = EditArgs {
            id: "reading".to_string(),
            name: Some("Later".to_string()),
            color: Some(String::new()),
            ..Default::default()
        };
        edit(&context, args, &quiet()).await.unwrap();

        let category = &context.categories()[0];
        assert_eq!(category.data.name, "Later");
        assert!(category.data.color.is_none());
    }

    #[tokio::test]
    async fn test_delete_refuses_referenced_category() {
        let context = ready_context().await;
        let reading = context
            .add_category(CategoryData::new("Reading"))
            .await
            .unwrap();
        let mut data = BookmarkData::new("https://example.com", "Example");
        data.add_category(&reading.id);
        context.add_bookmark(data).await.unwrap();

        let err = delete(&context, reading.id.clone(), true, &quiet())
            .await
            .unwrap_err();
        let cause = err.downcast_ref::<BookmarkError>().unwrap();
        assert_eq!(cause.code(), ErrorCode::CategoryHasBookmarks);
        assert_eq!(context.categories().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unreferenced_category() {
        let context = ready_context().await;
        let reading = context
            .add_category(CategoryData::new("Reading"))
            .await
            .unwrap();

        delete(&context, reading.id.clone(), false, &quiet())
            .await
            .unwrap();
        assert!(context.categories().is_empty());
    }
}
