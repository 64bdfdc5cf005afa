use log::info;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Set up a terminal logger with the given level ("debug", "info", "warn",
/// "error" or "none"; `None` means "info"). The polynomial routines report
/// soft diagnostics, e.g. a rank-deficient least-squares fit, on the warn
/// channel; nothing is logged until some logger is installed. If a logger is
/// already set the call is a no-op, so tests may call this freely.
pub fn init_logger(loglevel: Option<&str>) {
    let log_option = if let Some(level) = loglevel {
        match level {
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "none" => LevelFilter::Off,
            _ => panic!("loglevel must be debug, info, warn, error or none"),
        }
    } else {
        LevelFilter::Info
    };
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    match logger_instance {
        Ok(()) => info!("logger initialized with level {}", log_option),
        Err(_) => {} // a logger was already installed, keep it
    }
}
