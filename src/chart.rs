use std::error::Error;
use std::path::Path;

use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle, FontTransform};

use crate::categories::{CategorySet, RenderMode};
use crate::data::Entry;

/// Family every text style resolves to once the chart font is loaded.
const FONT_FAMILY: &str = "Sarasa Mono SC";

// ── Config ──────────────────────────────────────────────────────────────────

/// Fixed geometry and labeling for one render pass, handed to the
/// stateless `render` function.
pub struct ChartConfig {
    /// Canvas size: a 20in wide figure at 300 dpi; the height covers the
    /// 6in plot band plus the title block and tick-label band that a
    /// tight bounding box would add to the saved image.
    pub width: u32,
    pub height: u32,
    /// Outer padding, 0.5in at 300 dpi.
    pub margin: u32,
    pub title_lines: [String; 3],
    pub output_file: &'static str,
    pub y_max: f64,
    /// Bar width as a fraction of one x-axis unit.
    pub bar_width: f64,
    pub font_size: i32,
    pub title_size: i32,
}

impl ChartConfig {
    pub fn for_mode(mode: RenderMode) -> Self {
        let benchmark = match mode {
            RenderMode::Full => "KCORES LLM Arena - Mandelbrot Set Meet Libai Benchmark",
            RenderMode::WithoutFps => {
                "KCORES LLM Arena - Mandelbrot Set Meet Libai Benchmark (Without FPS)"
            }
        };
        ChartConfig {
            width: 6000,
            height: 2400,
            margin: 150,
            title_lines: [
                benchmark.to_string(),
                "by karminski-牙医".to_string(),
                "https://github.com/KCORES/kcores-llm-arena".to_string(),
            ],
            output_file: mode.output_file(),
            y_max: 110.0,
            bar_width: 0.8,
            font_size: 42,
            title_size: 50,
        }
    }
}

// ── Font ────────────────────────────────────────────────────────────────────

/// Load the chart font and register it with the text backend, both under
/// its own family name and as the `sans-serif` fallback. Must run before
/// any text is laid out.
pub fn register_chart_font(path: &Path) -> Result<(), String> {
    let bytes = std::fs::read(path).map_err(|e| format!("reading font {}: {}", path.display(), e))?;
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    for family in [FONT_FAMILY, "sans-serif"] {
        register_font(family, FontStyle::Normal, bytes)
            .map_err(|_| format!("font {} is not a usable TTF/OTF face", path.display()))?;
    }
    Ok(())
}

// ── Stacking transform ──────────────────────────────────────────────────────

/// Final cumulative stack height per entry: the sum of that entry's
/// values across the active categories, in category order.
pub fn stack_tops(entries: &[Entry], categories: &CategorySet) -> Vec<f64> {
    let mut tops = vec![0.0; entries.len()];
    for key in categories.keys() {
        for (top, entry) in tops.iter_mut().zip(entries) {
            *top += entry.point(key);
        }
    }
    tops
}

/// Integral totals print without a decimal point, the way the results
/// file spells them.
pub fn fmt_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}

// ── Rendering ───────────────────────────────────────────────────────────────

pub fn render(
    entries: &[Entry],
    categories: &CategorySet,
    cfg: &ChartConfig,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(cfg.output_file, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let label_style = TextStyle::from((FONT_FAMILY, cfg.font_size).into_font()).color(&BLACK);
    let title_style = TextStyle::from((FONT_FAMILY, cfg.title_size).into_font()).color(&BLACK);

    // ── Title block: three centered lines above the plot ────────────────
    let line_h = cfg.title_size as u32 * 13 / 10 + 8;
    let title_block = cfg.margin + cfg.title_lines.len() as u32 * line_h;
    let (title_area, body) = root.split_vertically(title_block);
    let (title_w, _) = title_area.dim_in_pixel();
    let centered = title_style.pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in cfg.title_lines.iter().enumerate() {
        let y = cfg.margin as i32 + i as i32 * line_h as i32;
        title_area.draw(&Text::new(line.as_str(), (title_w as i32 / 2, y), centered.clone()))?;
    }

    // ── Layout: legend panel split off to the right of the axes ────────
    let (body_w, _) = body.dim_in_pixel();
    let swatch = cfg.font_size;
    let gap = 16i32;
    let mut legend_text_w = 0u32;
    for name in categories.names() {
        legend_text_w = legend_text_w.max(root.estimate_text_size(name, &label_style)?.0);
    }
    let legend_w = (swatch as u32 + gap as u32 + legend_text_w + cfg.margin + 40).min(body_w / 2);

    let mut name_w = 0u32;
    for entry in entries {
        name_w = name_w.max(root.estimate_text_size(&entry.llm, &label_style)?.0);
    }
    // Model names render vertically under the axis; they occupy their
    // text width as height, plus the bottom padding.
    let x_label_h = name_w + cfg.margin + 20;

    let (plot_area, legend_area) = body.split_horizontally(body_w - legend_w);

    let n = entries.len();
    let x_max = n as f64 - 1.0 + 0.6;
    let mut chart = ChartBuilder::on(&plot_area)
        .margin_right(30)
        .x_label_area_size(x_label_h)
        .y_label_area_size(cfg.margin + 100)
        .build_cartesian_2d(-0.6f64..x_max, 0f64..cfg.y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n + 1)
        .x_label_formatter(&|_| String::new())
        .y_desc("Score")
        .axis_desc_style(label_style.clone())
        .y_label_style(label_style.clone())
        .draw()?;

    // ── Stacked segments, one series per category ───────────────────────
    let half = cfg.bar_width / 2.0;
    let edge = BLACK.stroke_width(2);
    let mut bottoms = vec![0.0f64; n];
    for (ci, key) in categories.keys().iter().enumerate() {
        let color = categories.color(ci);
        chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
            let x = i as f64;
            let (y0, y1) = (bottoms[i], bottoms[i] + entry.point(key));
            Rectangle::new([(x - half, y0), (x + half, y1)], color.filled())
        }))?;
        chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
            let x = i as f64;
            let (y0, y1) = (bottoms[i], bottoms[i] + entry.point(key));
            DashedPathElement::new(
                vec![
                    (x - half, y0),
                    (x + half, y0),
                    (x + half, y1),
                    (x - half, y1),
                    (x - half, y0),
                ],
                10,
                8,
                edge,
            )
        }))?;
        for (bottom, entry) in bottoms.iter_mut().zip(entries) {
            *bottom += entry.point(key);
        }
    }

    // ── Total labels above each bar ─────────────────────────────────────
    let value_style = label_style.pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
        Text::new(
            fmt_score(entry.final_score),
            (i as f64, bottoms[i]),
            value_style.clone(),
        )
    }))?;

    // ── Model names, vertical, under each bar ───────────────────────────
    let name_style = label_style
        .transform(FontTransform::Rotate90)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (i, entry) in entries.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(i as f64, 0.0));
        root.draw(&Text::new(entry.llm.as_str(), (px, py + 12), name_style.clone()))?;
    }

    // ── Legend: swatch + name rows, vertically centered ─────────────────
    let (_, legend_h) = legend_area.dim_in_pixel();
    let row_h = swatch + 18;
    let block_h = row_h * categories.len() as i32;
    let mut y = (legend_h as i32 - block_h) / 2;
    let legend_text = label_style.pos(Pos::new(HPos::Left, VPos::Center));
    for (ci, name) in categories.names().iter().enumerate() {
        let color = categories.color(ci);
        legend_area.draw(&Rectangle::new([(0, y), (swatch, y + swatch)], color.filled()))?;
        legend_area.draw(&Rectangle::new(
            [(0, y), (swatch, y + swatch)],
            BLACK.stroke_width(1),
        ))?;
        legend_area.draw(&Text::new(
            *name,
            (swatch + gap, y + swatch / 2),
            legend_text.clone(),
        ))?;
        y += row_h;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_entries;

    #[test]
    fn test_stack_tops_sum_all_categories() {
        let entries = parse_entries(
            r#"[{"LLM":"A","Final-Score":9,"point_1":2,"point_2":3,"point_17":4}]"#,
        )
        .unwrap();
        let full = CategorySet::for_mode(RenderMode::Full);
        assert_eq!(stack_tops(&entries, &full), vec![9.0]);
    }

    #[test]
    fn test_stack_tops_exclude_fps_in_without_fps_mode() {
        let entries = parse_entries(
            r#"[{"LLM":"A","Final-Score":9,"point_1":2,"point_2":3,"point_17":4}]"#,
        )
        .unwrap();
        let set = CategorySet::for_mode(RenderMode::WithoutFps);
        assert_eq!(stack_tops(&entries, &set), vec![5.0]);
    }

    #[test]
    fn test_stack_top_matches_adjusted_total() {
        // When the categories fully account for the score, the bar top
        // equals the adjusted Final-Score.
        let mut entries = parse_entries(
            r#"[{"LLM":"A","Final-Score":9,"point_1":2,"point_2":3,"point_17":4}]"#,
        )
        .unwrap();
        crate::data::strip_fps_scores(&mut entries);
        let set = CategorySet::for_mode(RenderMode::WithoutFps);
        assert_eq!(stack_tops(&entries, &set), vec![entries[0].final_score]);
    }

    #[test]
    fn test_stack_tops_missing_category_contributes_zero() {
        let entries =
            parse_entries(r#"[{"LLM":"A","Final-Score":2,"point_1":2}]"#).unwrap();
        let full = CategorySet::for_mode(RenderMode::Full);
        assert_eq!(stack_tops(&entries, &full), vec![2.0]);
    }

    #[test]
    fn test_fmt_score_drops_trailing_zero_fraction() {
        assert_eq!(fmt_score(80.0), "80");
        assert_eq!(fmt_score(97.5), "97.5");
        assert_eq!(fmt_score(0.0), "0");
    }

    #[test]
    fn test_config_for_mode() {
        let full = ChartConfig::for_mode(RenderMode::Full);
        assert_eq!(full.output_file, "llm_benchmark_results.png");
        assert_eq!(full.y_max, 110.0);
        assert_eq!(full.bar_width, 0.8);
        assert!(!full.title_lines[0].contains("Without FPS"));

        let without = ChartConfig::for_mode(RenderMode::WithoutFps);
        assert_eq!(without.output_file, "llm_benchmark_results_without_fps.png");
        assert!(without.title_lines[0].contains("(Without FPS)"));
    }
}
