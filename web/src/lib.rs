use std::sync::OnceLock;

use clap::Parser;
use wasm_bindgen::prelude::*;

pub use game::CakeGame;

mod game;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    /// Arguments come from the page hash, e.g. `#-vv&--seed=42`.
    fn parse_hash(hash: &str) -> Result<Self, clap::Error> {
        // the text before the first `#` stands in for the binary name
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn from_location() -> Self {
        let location_hash = gloo::utils::window()
            .location()
            .hash()
            .unwrap_or_else(|_| "".to_string());

        Self::parse_hash(&location_hash).unwrap_or_else(|err| {
            gloo::console::warn!(format!("Ignoring location arguments: {}", err));
            Self::default()
        })
    }
}

static FORCED_SEED: OnceLock<Option<u64>> = OnceLock::new();

/// Seed passed with `--seed`, read once at startup.
fn forced_seed() -> Option<u64> {
    FORCED_SEED.get().copied().flatten()
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let args = Args::from_location();
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {}", err));
        }
    }
    log::debug!("seed: {:?}", args.seed);
    let _ = FORCED_SEED.set(args.seed);
    log::debug!("App started");
}
