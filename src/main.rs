use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;

use udplogviz::{discovery, report};

/// Log analysis and report generation for the UDP reliable messaging
/// test harness
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to scan for *Client.log, *Server.log, *Proxy.log files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let test_sets = discovery::discover_test_sets(&args.dir)?;

    if test_sets.is_empty() {
        println!("{}", report::render_usage_hint(&args.dir));
        return Ok(());
    }

    println!("{}", report::render_header());
    for set in &test_sets {
        info!("Analyzing test set '{}'", set.name);
        print!("{}", report::render_test_set(set)?);
    }

    Ok(())
}
