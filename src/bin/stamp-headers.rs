use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use buildstamp::{config, logging, stamper, ui};

#[derive(clap::Parser)]
#[command(
    name = "stamp-headers",
    about = "Rewrite the license header of every C source in the project",
    version
)]
struct Args {
    #[arg(short, long, default_value = ".", help = "Project root directory")]
    root: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "List files that would change without writing them")]
    dry_run: bool,

    #[arg(short, long, help = "Log every updated file")]
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

    let summary = match stamper::stamp_tree(&args.root, &config.header, args.dry_run) {
        Ok(summary) => summary,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.dry_run {
        for path in &summary.changed {
            ui::display_status(&format!("Would update {}", path.display()));
        }
    } else if args.verbose || args.debug {
        ui::display_success(&format!(
            "Updated {} of {} source files",
            summary.changed.len(),
            summary.scanned
        ));
    }

    Ok(())
}
