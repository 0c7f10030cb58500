use std::process::ExitCode;

use clap::Parser;
use practices_cli::{init_logging, run_scrape, ScrapeArgs, ScrapeStatus};

fn main() -> ExitCode {
    let args = ScrapeArgs::parse();
    init_logging(&args.log);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start async runtime: {err}");
            return ExitCode::from(ScrapeStatus::ConfigError.code());
        }
    };

    let status = runtime.block_on(run_scrape(&args));
    ExitCode::from(status.code())
}
