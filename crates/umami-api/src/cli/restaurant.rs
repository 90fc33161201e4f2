//! `umami restaurants`: list the configured restaurants.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use umami_core::restaurant::RestaurantRepository;
use umami_infra::config::vector_store_dir;
use umami_infra::vector::lance::LanceVectorStore;
use umami_types::config::AppConfig;

use crate::state::restaurant_store;

pub async fn list_restaurants(data_dir: &Path, config: &AppConfig, json: bool) -> Result<()> {
    let store = restaurant_store(data_dir, config);
    let restaurants = store.list().await?;
    let vectors = LanceVectorStore::new(vector_store_dir(data_dir)).await?;

    let mut rows = Vec::with_capacity(restaurants.len());
    for restaurant in restaurants {
        let indexed = vectors.table_exists(&restaurant.chunk_table_name()).await;
        rows.push((restaurant, indexed));
    }

    if json {
        let items: Vec<_> = rows
            .iter()
            .map(|(r, indexed)| {
                serde_json::json!({
                    "id": r.id,
                    "name": r.name,
                    "filename": r.filename,
                    "indexed": indexed,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!();
        println!(
            "  {} No restaurants in {}",
            style("i").blue().bold(),
            style(store.path().display()).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Document").fg(Color::White),
        Cell::new("Index").fg(Color::White),
    ]);

    for (restaurant, indexed) in &rows {
        let index_cell = if *indexed {
            Cell::new("● indexed").fg(Color::Green)
        } else {
            Cell::new("○ not indexed").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&restaurant.id).fg(Color::White),
            Cell::new(&restaurant.name).fg(Color::Cyan),
            Cell::new(&restaurant.filename).fg(Color::DarkGrey),
            index_cell,
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
