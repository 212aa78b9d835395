mod args;
mod survey;

use clap::Parser;
use env_logger::Env;
use log::{debug, warn};

use crate::args::Args;
use crate::survey::run_survey;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }
    debug!("main: args: {:?}", args);

    if let Err(e) = run_survey(&args.input) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        std::process::exit(1);
    }
}
