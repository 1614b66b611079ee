use anyhow::Result;
use clap::Parser;

use canopy_lod::cluster::NodeOrdering;
use canopy_lod::config::Config;
use canopy_lod::data;
use canopy_lod::graph::Graph;
use canopy_lod::level::{DisplaySwapper, InitialView, LevelHierarchy, LevelSelector};
use canopy_lod::projection::CameraProjection;
use canopy_lod::storage;
use canopy_lod::viz;

#[derive(Parser, Debug)]
#[clap(
    name = "canopy-lod",
    about = "Zoom-adaptive level-of-detail construction for static graph views"
)]
struct Cli {
    /// Path to the input graph JSON (node/edge list)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "lod_results")]
    output_dir: String,

    /// Comma-separated zoom-ratio thresholds, strictly ascending
    #[clap(long, default_value = "0.07,0.11,0.2,0.34,0.58,1.0")]
    ratios: String,

    /// Viewport radius increment per level
    #[clap(long, default_value = "25.0")]
    radius_step: f64,

    /// Smallest render size after scaling
    #[clap(long, default_value = "4.0")]
    min_size: f64,

    /// Largest render size after scaling
    #[clap(long, default_value = "20.0")]
    max_size: f64,

    /// Viewport width in pixels
    #[clap(long, default_value = "1024.0")]
    width: f64,

    /// Viewport height in pixels
    #[clap(long, default_value = "768.0")]
    height: f64,

    /// Comma-separated zoom ratios to replay through the level selector
    #[clap(long)]
    zoom_trace: Option<String>,

    /// Enumerate nodes in file order instead of sorted by id
    #[clap(long)]
    insertion_order: bool,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

/// Stands in for a renderer: logs every snapshot it is handed
struct LoggingSwapper;

impl DisplaySwapper for LoggingSwapper {
    fn swap(&mut self, graph: &Graph) {
        log::info!(
            "Displaying snapshot with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
    }
}

/// Parse a comma-separated list of ratios
fn parse_ratio_list(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("invalid ratio `{}`: {}", part.trim(), e))
        })
        .collect()
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting level-of-detail construction");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // Create output directory
    std::fs::create_dir_all(&args.output_dir)?;

    let config = Config {
        ratio_thresholds: parse_ratio_list(&args.ratios)?,
        radius_step: args.radius_step,
        size_range: (args.min_size, args.max_size),
        viewport: (args.width, args.height),
        ordering: if args.insertion_order {
            NodeOrdering::Insertion
        } else {
            NodeOrdering::ById
        },
        initial_view: InitialView::Coarsest,
    };

    // 1. Load data
    let loaded = data::load_graph(&args.input, config.size_range)?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        loaded.graph.node_count(),
        loaded.graph.edge_count()
    );

    // 2. Build the level hierarchy against the framing camera
    let camera = CameraProjection::framing(&loaded.graph, config.viewport);
    let hierarchy = LevelHierarchy::build(
        &loaded.graph,
        &config.ratio_thresholds,
        config.radius_step,
        &camera,
        &loaded.scale,
        config.ordering,
    )?;

    // 3. Replay camera events through the level selector
    let mut selector = LevelSelector::new(&hierarchy, config.initial_view);
    let mut swapper = LoggingSwapper;
    selector.prime(&hierarchy, &mut swapper);

    if let Some(trace) = &args.zoom_trace {
        let ratios = parse_ratio_list(trace)?;
        let mut swaps = 0;

        for &ratio in &ratios {
            if selector.dispatch(&hierarchy, ratio, &mut swapper) {
                swaps += 1;
            }
            log::info!("Zoom ratio {} -> level {}", ratio, selector.current_index());
        }

        log::info!("Replayed {} camera events ({} swaps)", ratios.len(), swaps);
    }

    // 4. Save results
    storage::save_results(&hierarchy, &args.output_dir)?;

    // 5. Generate visualizations if requested
    if !args.skip_viz {
        viz::generate_visualizations(&hierarchy, &args.output_dir)?;
    }

    log::info!("Construction complete. Results saved to {}", args.output_dir);

    Ok(())
}
