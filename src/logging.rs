use log::LevelFilter;

/// Maps the number of `-v` flags to a log level. Without `-v`, the level is left to
/// `RUST_LOG`.
pub fn level_for_verbosity(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Error),
        2 => Some(LevelFilter::Warn),
        3 => Some(LevelFilter::Info),
        _ => Some(LevelFilter::Debug),
    }
}

pub fn init(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}
