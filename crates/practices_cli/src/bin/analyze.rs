use std::process::ExitCode;

use clap::Parser;
use practices_cli::{init_logging, run_analyze, AnalyzeArgs};

fn main() -> ExitCode {
    let args = AnalyzeArgs::parse();
    init_logging(&args.log);
    ExitCode::from(run_analyze(&args).code())
}
