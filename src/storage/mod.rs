//! Results persistence module

use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::data::GraphFile;
use crate::level::LevelHierarchy;

/// Save the hierarchy summary and per-level snapshots to a directory
pub fn save_results(hierarchy: &LevelHierarchy, output_dir: &str) -> Result<()> {
    log::info!("Saving {} levels to {}", hierarchy.len(), output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(hierarchy, output_dir)?;
    save_levels(hierarchy, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save per-level statistics
fn save_summary(hierarchy: &LevelHierarchy, output_dir: &str) -> Result<()> {
    log::info!("Saving hierarchy summary");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let base_mass = hierarchy
        .level(0)
        .map(|level| level.graph.total_original_size())
        .unwrap_or(0.0);

    let summary = json!({
        "level_count": hierarchy.len(),
        "conserved_mass": base_mass,
        "levels": hierarchy.levels().iter().enumerate().map(|(i, level)| {
            json!({
                "index": i,
                "ratio_threshold": level.ratio_threshold,
                "radius": level.radius,
                "node_count": level.graph.node_count(),
                "edge_count": level.graph.edge_count(),
                "total_original_size": level.graph.total_original_size(),
            })
        }).collect::<Vec<_>>(),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save each level's graph as a reloadable node/edge list
fn save_levels(hierarchy: &LevelHierarchy, output_dir: &str) -> Result<()> {
    log::info!("Saving level snapshots");

    let levels_dir = Path::new(output_dir).join("levels");
    fs::create_dir_all(&levels_dir)?;

    for (i, level) in hierarchy.levels().iter().enumerate() {
        let path = levels_dir.join(format!("level_{}.json", i));
        let mut file = File::create(path)?;

        let records = GraphFile::from_graph(&level.graph);
        file.write_all(to_string_pretty(&records)?.as_bytes())?;
    }

    Ok(())
}
