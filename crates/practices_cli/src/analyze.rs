use practices_engine::{generate_plots, load_dataset, ChartOptions, PlottersBarChart};
use practices_logging::{practices_error, practices_info};

use crate::args::AnalyzeArgs;
use crate::status::AnalyzeStatus;

/// Loads the dataset and writes one distribution chart per column.
pub fn run_analyze(args: &AnalyzeArgs) -> AnalyzeStatus {
    let dataset = match load_dataset(&args.input) {
        Ok(dataset) => dataset,
        Err(err) => {
            practices_error!("{}", err);
            return AnalyzeStatus::DatasetUnavailable;
        }
    };
    practices_info!(
        "Loaded {} rows from {}",
        dataset.rows.len(),
        args.input.display()
    );

    let renderer = PlottersBarChart::new(ChartOptions {
        font_path: args.font.clone(),
        ..ChartOptions::default()
    });
    match generate_plots(
        &dataset,
        &args.selected_columns(),
        &args.output_dir,
        &renderer,
    ) {
        Ok(summary) => {
            practices_info!(
                "Wrote {} charts to {} ({} columns skipped)",
                summary.written.len(),
                args.output_dir.display(),
                summary.skipped.len()
            );
            AnalyzeStatus::Charted
        }
        Err(err) => {
            practices_error!("Failed to generate charts: {}", err);
            AnalyzeStatus::ChartFailed
        }
    }
}
