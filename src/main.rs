// Clinsight - main.rs
// Bootstrap runner: config, tracing, and CLI dispatch.

use clap::Parser;
use clinsight::cli::{dispatch, Cli};

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    dispatch(cli);
}
