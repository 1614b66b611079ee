//! Visualization export module

use anyhow::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::level::LevelHierarchy;

/// Write one GraphML file per level for external visualization tools
pub fn generate_visualizations(hierarchy: &LevelHierarchy, output_dir: &str) -> Result<()> {
    log::info!("Generating visualizations for {} levels", hierarchy.len());

    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    for (i, level) in hierarchy.levels().iter().enumerate() {
        let file_path = viz_dir.join(format!("level_{}.graphml", i));
        let mut file = File::create(file_path)?;

        // Write GraphML header and attribute keys
        writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
        writeln!(file, "  <key id=\"x\" for=\"node\" attr.name=\"x\" attr.type=\"double\"/>")?;
        writeln!(file, "  <key id=\"y\" for=\"node\" attr.name=\"y\" attr.type=\"double\"/>")?;
        writeln!(file, "  <key id=\"size\" for=\"node\" attr.name=\"size\" attr.type=\"double\"/>")?;
        writeln!(file, "  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>")?;
        writeln!(file, "  <key id=\"weight\" for=\"edge\" attr.name=\"weight\" attr.type=\"double\"/>")?;
        writeln!(file, "  <graph id=\"level{}\" edgedefault=\"undirected\">", i)?;

        // Write nodes
        for id in level.graph.node_ids() {
            let Some(attributes) = level.graph.node(id) else {
                continue;
            };

            writeln!(file, "    <node id=\"{}\">", id)?;
            writeln!(file, "      <data key=\"x\">{}</data>", attributes.position.x)?;
            writeln!(file, "      <data key=\"y\">{}</data>", attributes.position.y)?;
            writeln!(file, "      <data key=\"size\">{}</data>", attributes.size)?;
            if let Some(label) = &attributes.label {
                writeln!(file, "      <data key=\"label\">{}</data>", label)?;
            }
            writeln!(file, "    </node>")?;
        }

        // Write edges
        let mut edge_id = 0;
        for (source, target, weight) in level.graph.edges() {
            writeln!(
                file,
                "    <edge id=\"e{}\" source=\"{}\" target=\"{}\">",
                edge_id, source, target
            )?;
            writeln!(file, "      <data key=\"weight\">{}</data>", weight)?;
            writeln!(file, "    </edge>")?;
            edge_id += 1;
        }

        // Write GraphML footer
        writeln!(file, "  </graph>")?;
        writeln!(file, "</graphml>")?;
    }

    log::info!("Visualizations generated successfully");

    Ok(())
}
