use clap::ValueEnum;
use plotters::style::RGBColor;

// ── Category tables ─────────────────────────────────────────────────────────
//
// Three index-aligned lists: JSON field key, legend name, segment color.
// Alignment is enforced by the shared array length.

/// Ordered scoring category keys as they appear in the results JSON.
pub const CATEGORY_KEYS: [&str; 17] = [
    "point_1", "point_2", "point_3", "point_4", "point_5", "point_6", "point_7", "point_8",
    "point_9", "point_10", "point_11", "point_12", "point_13", "point_14", "point_15", "point_16",
    "point_17",
];

/// Legend names, index-aligned with `CATEGORY_KEYS`.
pub const DISPLAY_NAMES: [&str; 17] = [
    "1 - 使用 canvas 绘制动画",
    "2 - 全屏展示动画",
    "3 - 所有代码放在同一个HTML文件里面",
    "4 - Mandelbrot Set 图形美观度",
    "5 - Mandelbrot Set 的主要图形大小",
    "6 - Mandelbrot Set 的主要图形每渲染一次每帧放大 0.5%",
    "7 - 总计渲染200次",
    "8 - 总计渲染200次后重置并循环",
    "9 - 李白诗书写正确",
    "10 - 李白诗处理",
    "11 - Mandelbrot Set 的 Main cardioid and period bulbs 部分留空",
    "12 - 动画的中心应使始终为 Main cardioid and period bulbs 的交界处",
    "13 - 动画字体大小8px, 字体渲染排列也是8px，无间距 ",
    "14 - 字符从 mandelbrot set的最外围使用最深的颜色，然后依次变浅",
    "15 - 左上角指示器计算和展示正确",
    "16 - 指示器样式",
    "17 - 平均FPS水平",
];

/// Segment fill colors, index-aligned with `CATEGORY_KEYS`.
pub const SEGMENT_COLORS: [&str; 17] = [
    "#192f60", "#223a70", "#2a4073", "#274a78", "#4a488e", "#4d4398", "#5654a2", "#706caa",
    "#68699b", "#867ba9", "#8491c3", "#bbbcde", "#bbc8e6", "#ebf6f7", "#e8ecef", "#eaedf7",
    "#eaf4fc",
];

/// The FPS-derived category; the one dropped in without-fps mode.
pub const FPS_KEY: &str = "point_17";

// ── Render mode ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// Keep all 17 categories.
    Full,
    /// Drop the FPS category and fold it out of the totals.
    WithoutFps,
}

impl RenderMode {
    pub fn output_file(self) -> &'static str {
        match self {
            RenderMode::Full => "llm_benchmark_results.png",
            RenderMode::WithoutFps => "llm_benchmark_results_without_fps.png",
        }
    }
}

// ── Active category set ─────────────────────────────────────────────────────

/// The categories actually rendered for one run: the full table, or the
/// table with its last entry (FPS) removed from all three lists.
pub struct CategorySet {
    keys: &'static [&'static str],
    names: &'static [&'static str],
    colors: Vec<RGBColor>,
}

impl CategorySet {
    pub fn for_mode(mode: RenderMode) -> Self {
        let n = match mode {
            RenderMode::Full => CATEGORY_KEYS.len(),
            RenderMode::WithoutFps => CATEGORY_KEYS.len() - 1,
        };
        CategorySet {
            keys: &CATEGORY_KEYS[..n],
            names: &DISPLAY_NAMES[..n],
            colors: SEGMENT_COLORS[..n].iter().map(|h| hex_color(h)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[&'static str] {
        self.keys
    }

    pub fn names(&self) -> &[&'static str] {
        self.names
    }

    pub fn color(&self, index: usize) -> RGBColor {
        self.colors[index]
    }
}

/// `"#rrggbb"` to an RGB color; malformed components read as 0.
fn hex_color(hex: &str) -> RGBColor {
    let hex = hex.trim_start_matches('#');
    let byte = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    RGBColor(byte(0..2), byte(2..4), byte(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mode_keeps_all_seventeen() {
        let set = CategorySet::for_mode(RenderMode::Full);
        assert_eq!(set.len(), 17);
        assert_eq!(set.keys().len(), set.names().len());
        assert_eq!(set.keys().last(), Some(&FPS_KEY));
        assert_eq!(set.names().last(), Some(&"17 - 平均FPS水平"));
    }

    #[test]
    fn test_without_fps_drops_last_of_each_list() {
        let set = CategorySet::for_mode(RenderMode::WithoutFps);
        assert_eq!(set.len(), 16);
        assert_eq!(set.keys().len(), set.names().len());
        assert_eq!(set.keys().last(), Some(&"point_16"));
        assert_eq!(set.names().last(), Some(&"16 - 指示器样式"));
        assert!(!set.keys().contains(&FPS_KEY));
        assert_eq!(set.color(15), hex_color("#eaedf7"));
    }

    #[test]
    fn test_hex_color_parses_components() {
        assert_eq!(hex_color("#192f60"), RGBColor(0x19, 0x2f, 0x60));
        assert_eq!(hex_color("#eaf4fc"), RGBColor(0xea, 0xf4, 0xfc));
    }

    #[test]
    fn test_hex_color_malformed_reads_zero() {
        assert_eq!(hex_color("#zz2f60"), RGBColor(0, 0x2f, 0x60));
        assert_eq!(hex_color("#19"), RGBColor(0x19, 0, 0));
    }

    #[test]
    fn test_output_file_per_mode() {
        assert_eq!(RenderMode::Full.output_file(), "llm_benchmark_results.png");
        assert_eq!(
            RenderMode::WithoutFps.output_file(),
            "llm_benchmark_results_without_fps.png"
        );
    }
}
