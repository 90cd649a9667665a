use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use buildstamp::git::Git2TagSource;
use buildstamp::renderer::{self, RenderOptions};
use buildstamp::{config, logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "render-version",
    about = "Render a version header template from the nearest release tag",
    version
)]
struct Args {
    /// Repository root used for the tag lookup
    root: PathBuf,

    /// Template file containing ${..._VERSION...} placeholders
    template: PathBuf,

    /// Build type label substituted for the build type placeholder
    build_type: String,

    /// Version used when no tag can be found
    fallback_version: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Write to this file instead of stdout")]
    output: Option<PathBuf>,

    #[arg(short, long, help = "Print progress information")]
    verbose: bool,

    #[arg(short, long, help = "Print debug information")]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::set_up_logging(args.debug, args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let options = RenderOptions {
        root: args.root,
        template: args.template,
        build_type: args.build_type,
        fallback: args.fallback_version,
    };

    let outcome = match renderer::render_file(&options, &config.version, &Git2TagSource::new()) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match args.output {
        Some(path) => {
            renderer::write_if_changed(&path, &format!("{}\n", outcome.rendered))?;
        }
        None => println!("{}", outcome.rendered),
    }

    Ok(())
}
