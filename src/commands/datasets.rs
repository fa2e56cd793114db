use colored::Colorize;
use prettytable::{format, Table};

use crate::api::{PageParams, PaginatedResponse};
use crate::app::AppContext;
use crate::error::Result;
use crate::models::Dataset;

/// Build page parameters from CLI flags
pub fn page_params(
    page: Option<u32>,
    page_size: Option<u32>,
    keyword: Option<String>,
    creator: Option<String>,
) -> PageParams {
    let mut params = PageParams {
        page,
        page_size,
        ..PageParams::default()
    };
    params.filters.keyword = keyword;
    params.filters.creator = creator;
    params
}

/// Handle `datasets list`
pub async fn list_datasets(ctx: &AppContext, json: bool) -> Result<()> {
    let datasets = ctx.datasets.get_datasets().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&datasets)?);
        return Ok(());
    }

    if datasets.is_empty() {
        println!("{}", "No datasets found.".yellow());
        return Ok(());
    }

    println!("\nDatasets:");
    dataset_table(&datasets).printstd();
    println!();
    println!(
        "Use {} to inspect a dataset.",
        "datadash datasets show <ID>".cyan()
    );
    println!();
    Ok(())
}

/// Handle `datasets show`
pub async fn show_dataset(ctx: &AppContext, id: &str, json: bool) -> Result<()> {
    let dataset = ctx.datasets.get_dataset(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    println!("\n{} {}", dataset.name.bold(), format!("({})", dataset.id).cyan());
    if let Some(description) = &dataset.description {
        println!("{}", description);
    }
    println!();
    println!("Creator: {}", dataset.creator.as_deref().unwrap_or("-"));
    println!("Rows:    {}", display_rows(&dataset));
    if let Some(updated) = dataset.updated_at {
        println!("Updated: {}", updated.format("%Y-%m-%d %H:%M"));
    }

    if !dataset.columns.is_empty() {
        println!();
        column_table(&dataset).printstd();
    }
    println!();
    Ok(())
}

/// Handle `datasets page`
pub async fn page_datasets(ctx: &AppContext, params: &PageParams, json: bool) -> Result<()> {
    let page = ctx.datasets.get_datasets_page(params).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.list.is_empty() {
        println!("{}", "No datasets on this page.".yellow());
    } else {
        println!();
        dataset_table(&page.list).printstd();
    }
    println!("{}", page_footer(&page));
    Ok(())
}

fn dataset_table(datasets: &[Dataset]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Name".bold(),
        "Creator".bold(),
        "Rows".bold(),
        "Last Updated".bold()
    ]);

    for dataset in datasets {
        let updated = dataset
            .updated_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(prettytable::row![
            dataset.id.cyan(),
            super::truncate(&dataset.name, 40),
            dataset.creator.as_deref().unwrap_or("-"),
            display_rows(dataset),
            updated
        ]);
    }

    table
}

fn column_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Column".bold(),
        "Type".bold(),
        "Description".bold()
    ]);
    for column in &dataset.columns {
        table.add_row(prettytable::row![
            column.name,
            column.column_type,
            column.description.as_deref().unwrap_or("")
        ]);
    }
    table
}

fn display_rows(dataset: &Dataset) -> String {
    dataset
        .row_count
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn page_footer<T>(page: &PaginatedResponse<T>) -> String {
    let mut footer = format!(
        "Page {} of {} ({} datasets)",
        page.page,
        page.page_count().max(1),
        page.total
    );
    if page.has_next_page() {
        footer.push_str(&format!(
            ", next: {}",
            format!("--page {}", page.page.saturating_add(1)).cyan()
        ));
    }
    footer
}
