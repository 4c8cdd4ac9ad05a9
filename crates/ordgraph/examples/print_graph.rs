//! Builds a small graph of words, then walks its edges in both directions.
//!
//! Run with `RUST_LOG=trace` to see the graph mutations as they happen.
use log::LevelFilter;
use ordered_float::NotNan;
use ordgraph::Graph;

fn init_logger() {
    env_logger::builder()
        .default_format()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let mut graph = Graph::<String, NotNan<f64>>::from_nodes(["a", "b", "c"].map(String::from));
    for (src, dst, weight) in [
        ("b", "c", 1.0),
        ("b", "c", 2.0),
        ("b", "a", 2.8),
        ("b", "a", 1.5),
        ("a", "b", 1.0),
        ("a", "b", 2.0),
        ("a", "c", 1.0),
        ("a", "c", 2.0),
    ] {
        graph.insert_edge(src, dst, NotNan::new(weight)?)?;
    }
    log::info!("Built graph with {} nodes and {} edges", graph.num_nodes(), graph.num_edges());

    println!("Forward:");
    for (src, dst, weight) in &graph {
        println!("  {src} -> {dst} ({weight})");
    }

    println!("Reverse:");
    for (src, dst, weight) in graph.iter().rev() {
        println!("  {src} -> {dst} ({weight})");
    }

    print!("{graph}");
    Ok(())
}
