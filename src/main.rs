mod categories;
mod chart;
mod data;

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::categories::{CategorySet, RenderMode};
use crate::chart::ChartConfig;

/// Results file produced by the arena scoring run.
const DATA_PATH: &str = "benchmark-data.json";
/// Chart face; covers the CJK criterion names in the legend.
const FONT_PATH: &str = "assets/fonts/sarasa-mono-sc-regular.ttf";

#[derive(Parser)]
#[command(name = "render-chart", version)]
#[command(about = "Render the stacked score chart from LLM arena benchmark results")]
struct Cli {
    /// Rendering type: full keeps every category, without-fps drops the
    /// FPS category and folds it out of the totals
    #[arg(long, value_enum, default_value = "full")]
    render_type: RenderMode,
}

fn main() {
    let cli = Cli::parse();

    chart::register_chart_font(Path::new(FONT_PATH)).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    eprintln!("Reading: {}", DATA_PATH);
    let mut entries = data::load_entries(Path::new(DATA_PATH)).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.render_type == RenderMode::WithoutFps {
        data::strip_fps_scores(&mut entries);
    }
    data::sort_by_final_score(&mut entries);

    let categories = CategorySet::for_mode(cli.render_type);
    let cfg = ChartConfig::for_mode(cli.render_type);

    let pb = spinner("render");
    pb.set_message(format!(
        "{} bars, {} categories",
        entries.len(),
        categories.len()
    ));
    if let Err(e) = chart::render(&entries, &categories, &cfg) {
        pb.finish_and_clear();
        eprintln!("Error rendering chart: {}", e);
        std::process::exit(1);
    }
    pb.finish_with_message(format!(
        "{}  {} bars, {} categories",
        style("done").green().bold(),
        entries.len(),
        categories.len()
    ));

    eprintln!("  {} {}", style("->").green().bold(), cfg.output_file);
}

// ── Progress ────────────────────────────────────────────────────────────────

fn spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {prefix:<20} {msg}")
            .unwrap()
            .tick_chars("🌑🌒🌓🌔🌕🌖🌗🌘 "),
    );
    pb.set_prefix(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
