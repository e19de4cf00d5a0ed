use env_logger::Builder;
use log::LevelFilter;
use std::env;

/// Initialize logging for the CLI.
///
/// `Info` by default, `Debug` with `--verbose`. `RUST_LOG` overrides both.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // A second init (e.g. from tests) is harmless
    let _ = builder.try_init();
    log::debug!("Logger initialized at {level:?} level");
}
