//! `umami ingest`: index one restaurant's document.

use std::path::Path;

use anyhow::Result;
use console::style;

use umami_infra::ingest::ingest_restaurant;
use umami_types::config::AppConfig;

use crate::state::{open_chunk_index, openai_config, restaurant_store};

pub async fn run_ingest(data_dir: &Path, config: &AppConfig, id: &str, json: bool) -> Result<()> {
    let store = restaurant_store(data_dir, config);
    let llm_config = openai_config(config)?;
    let index = open_chunk_index(data_dir, &llm_config).await?;

    let spinner = (!json).then(|| super::spinner(format!("Indexing {id}...")));
    let result = ingest_restaurant(&store, &index, id).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "restaurant_id": report.restaurant_id,
                "document": report.document,
                "chunks": report.chunks,
                "table": report.table,
            }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Indexed {} chunks for {}",
        style("✓").green().bold(),
        style(report.chunks).bold(),
        style(&report.restaurant_id).cyan()
    );
    println!("  {}  {}", style("Document:").bold(), style(&report.document).dim());
    println!("  {}     {}", style("Table:").bold(), style(&report.table).dim());
    println!();
    Ok(())
}
