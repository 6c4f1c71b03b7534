//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the quote demo
#[derive(Debug, Parser)]
pub struct QuoteArgs {
    /// Fixture set to load carts and vouchers from
    #[clap(short, long, default_value = "scenarios")]
    pub fixture: String,

    /// Cart to price; every cart in the set when omitted
    #[clap(short, long)]
    pub cart: Option<String>,

    /// Voucher code to attach
    #[clap(short, long)]
    pub voucher: Option<String>,

    /// Directory holding the fixture sets
    #[clap(long, env = "VOUCHER_FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Treat the customer as signed in when checking voucher validity
    #[clap(long)]
    pub authenticated: bool,
}
