use env_logger::Builder;
use log::LevelFilter;

/// Sets up `env_logger` for the binaries.
///
/// Warnings only by default, info with `verbose`, debug with `debug`.
/// `RUST_LOG` still overrides the filter when set.
pub fn set_up_logging(is_debug: bool, is_verbose: bool) {
    let mut builder = Builder::new();

    let level = if is_debug {
        LevelFilter::Debug
    } else if is_verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    builder
        .filter_module("buildstamp", level)
        .filter_module("stamp_headers", level)
        .filter_module("render_version", level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .target(env_logger::Target::Stderr);

    builder.init();

    if is_debug && is_verbose {
        log::warn!("Specified both --verbose and --debug! Will ignore --verbose.");
    }
}
