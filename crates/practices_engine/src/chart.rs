use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use practices_logging::{practices_debug, practices_info, practices_warn};

use crate::persist::ensure_output_dir;
use crate::Dataset;

/// Columns charted when the caller does not choose any.
pub const DEFAULT_COLUMNS: [&str; 7] = [
    "Organisation",
    "Type of Organisation",
    "Country",
    "Language",
    "Key Area",
    "Sector",
    "Scope",
];

const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("output directory {path} unusable: {message}")]
    OutputDir { path: PathBuf, message: String },
    #[error("failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },
}

/// Draws one chart of category counts to an image file.
pub trait ChartRenderer {
    fn render(&self, column: &str, counts: &[(String, usize)], path: &Path)
        -> Result<(), ChartError>;
}

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub width: u32,
    /// Minimum height; grows with the number of categories.
    pub min_height: u32,
    pub row_height: u32,
    pub label_width: u32,
    /// TrueType font for labels. System locations are tried when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            min_height: 600,
            row_height: 22,
            label_width: 300,
            font_path: None,
        }
    }
}

/// Horizontal bar chart rendered to PNG with plotters.
#[derive(Debug, Clone)]
pub struct PlottersBarChart {
    options: ChartOptions,
    labels: bool,
}

const TOP: i32 = 50;
const BOTTOM: i32 = 40;
const RIGHT: i32 = 60;
const MAX_LABEL_CHARS: usize = 40;

impl PlottersBarChart {
    pub fn new(options: ChartOptions) -> Self {
        let labels = ensure_font(options.font_path.as_deref());
        if !labels {
            practices_warn!("No TrueType font found; charts will be drawn without labels");
        }
        Self { options, labels }
    }

    fn height_for(&self, categories: usize) -> u32 {
        let rows = self.options.row_height * categories as u32;
        (rows + (TOP + BOTTOM) as u32).max(self.options.min_height)
    }
}

impl Default for PlottersBarChart {
    fn default() -> Self {
        Self::new(ChartOptions::default())
    }
}

impl ChartRenderer for PlottersBarChart {
    fn render(
        &self,
        column: &str,
        counts: &[(String, usize)],
        path: &Path,
    ) -> Result<(), ChartError> {
        let render_err = |err: String| ChartError::Render {
            path: path.to_path_buf(),
            message: err,
        };
        let width = self.options.width;
        let height = self.height_for(counts.len());
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| render_err(e.to_string()))?;

        let left = if self.labels {
            self.options.label_width as i32
        } else {
            10
        };
        let plot_width = (width as i32 - left - RIGHT).max(1);
        let plot_height = (height as i32 - TOP - BOTTOM).max(1);
        let max_count = counts.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
        let row = plot_height / counts.len().max(1) as i32;
        let bar_pad = (row / 6).max(1);
        let bar_color = RGBColor(70, 130, 180);

        // Axis line.
        root.draw(&PathElement::new(
            vec![(left, TOP), (left, TOP + plot_height)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| render_err(e.to_string()))?;

        for (i, (value, count)) in counts.iter().enumerate() {
            let y0 = TOP + row * i as i32 + bar_pad;
            let y1 = (TOP + row * (i as i32 + 1) - bar_pad).max(y0 + 1);
            let bar = (plot_width as i64 * *count as i64 / max_count as i64) as i32;
            root.draw(&Rectangle::new(
                [(left, y0), (left + bar.max(1), y1)],
                bar_color.filled(),
            ))
            .map_err(|e| render_err(e.to_string()))?;

            if self.labels {
                let font = (FONT_FAMILY, 13).into_font();
                let label = truncate_label(value);
                let label_style =
                    TextStyle::from(font.clone()).pos(Pos::new(HPos::Right, VPos::Center));
                root.draw(&Text::new(label, (left - 6, (y0 + y1) / 2), label_style))
                    .map_err(|e| render_err(e.to_string()))?;
                let count_style = TextStyle::from(font).pos(Pos::new(HPos::Left, VPos::Center));
                root.draw(&Text::new(
                    count.to_string(),
                    (left + bar + 4, (y0 + y1) / 2),
                    count_style,
                ))
                .map_err(|e| render_err(e.to_string()))?;
            }
        }

        if self.labels {
            let title_style = TextStyle::from((FONT_FAMILY, 20).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(
                format!("Distribution of {column}"),
                (width as i32 / 2, TOP / 2),
                title_style,
            ))
            .map_err(|e| render_err(e.to_string()))?;
            let axis_style = TextStyle::from((FONT_FAMILY, 14).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(
                "Count",
                (left + plot_width / 2, height as i32 - BOTTOM / 2),
                axis_style,
            ))
            .map_err(|e| render_err(e.to_string()))?;
        }

        root.present().map_err(|e| render_err(e.to_string()))?;
        practices_debug!("Rendered {} categories for {}", counts.len(), column);
        Ok(())
    }
}

fn truncate_label(value: &str) -> String {
    if value.chars().count() <= MAX_LABEL_CHARS {
        return value.to_string();
    }
    let mut label: String = value.chars().take(MAX_LABEL_CHARS - 1).collect();
    label.push('…');
    label
}

/// Registers a label font once per process. Returns whether one is available.
fn ensure_font(preferred: Option<&Path>) -> bool {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    *REGISTERED.get_or_init(|| {
        let candidates = preferred
            .into_iter()
            .map(Path::to_path_buf)
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));
        for candidate in candidates {
            let Ok(bytes) = fs::read(&candidate) else {
                continue;
            };
            // plotters keeps registered fonts for the life of the process.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if register_font(FONT_FAMILY, FontStyle::Normal, bytes).is_ok() {
                practices_debug!("Using chart font {}", candidate.display());
                return true;
            }
        }
        false
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

/// File a column's chart is written to.
pub fn chart_path(output_dir: &Path, column: &str) -> PathBuf {
    output_dir.join(format!("{column}_distribution.png"))
}

/// Renders one chart per requested column present in `dataset`.
///
/// Absent columns are logged and skipped; they never stop the remaining
/// columns from being rendered.
pub fn generate_plots(
    dataset: &Dataset,
    columns: &[String],
    output_dir: &Path,
    renderer: &dyn ChartRenderer,
) -> Result<PlotSummary, ChartError> {
    ensure_output_dir(output_dir).map_err(|err| ChartError::OutputDir {
        path: output_dir.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut summary = PlotSummary::default();
    for column in columns {
        let Some(counts) = dataset.value_counts(column) else {
            practices_warn!("Column '{}' not present in dataset. Skipping.", column);
            summary.skipped.push(column.clone());
            continue;
        };
        let path = chart_path(output_dir, column);
        renderer.render(column, &counts, &path)?;
        practices_info!("Saved {}", path.display());
        summary.written.push(path);
    }
    Ok(summary)
}
