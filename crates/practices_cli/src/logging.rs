use practices_logging::LogDestination;

use crate::args::LogArgs;

/// Installs the global logger: terminal always, plus the log file if given.
pub fn init_logging(args: &LogArgs) -> bool {
    let destination = match &args.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    practices_logging::initialize(args.log_level.filter(), destination)
}
