use std::fs::{File, OpenOptions};

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

/// Initialize logging: warnings and errors to the terminal by default, debug
/// level with `--verbose` or `GLM_DEBUG`. Debug runs also append to the log
/// file under the data directory.
pub fn init(verbose: bool) {
    let debug = verbose || glm_platform::flag("GLM_DEBUG");
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("glm")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if debug && let Some(file) = log_sink() {
        loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
    }

    let _ = CombinedLogger::init(loggers);
}

fn log_sink() -> Option<File> {
    let paths = glm_platform::AppPaths::new().ok()?;
    paths.ensure_dirs().ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .ok()
}
