//! Command-line interface for tickerlens.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | One-shot symbol search |
//! | `type-ahead` | Replay typed text through the debounced search controller |
//! | `movers` | Poll the movers feed |
//! | `prices` | Price detail with derived statistics |
//!
//! Connection settings come from the environment (see `config.rs`).

use clap::{Parser, Subcommand, ValueEnum};

use tickerlens_market_data::Granularity;

#[derive(Debug, Parser)]
#[command(
    name = "tickerlens",
    version,
    about = "Live market data from the terminal, with offline fallback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search symbols by keyword.
    Search {
        query: String,
        #[arg(long, default_value_t = 8)]
        limit: usize,
    },

    /// Type TEXT one character at a time and print every search view update.
    TypeAhead {
        text: String,
        /// Delay between keystrokes.
        #[arg(long, default_value_t = 120)]
        keystroke_ms: u64,
        /// Highlight this row with the arrow keys and press Enter.
        #[arg(long)]
        select: Option<usize>,
    },

    /// Poll index movers and print each feed update.
    Movers {
        /// Number of settled fetches to print before stopping.
        #[arg(long, default_value_t = 3)]
        ticks: usize,
        /// Read the provider without synthetic fallback.
        #[arg(long)]
        direct: bool,
    },

    /// Price series for one symbol with change and range statistics.
    Prices {
        symbol: String,
        #[arg(long, default_value_t = 1)]
        days: u32,
        #[arg(long, value_enum, default_value_t = GranularityArg::Intraday)]
        granularity: GranularityArg,
        #[arg(long, default_value_t = 50)]
        limit: usize,
        /// Read the provider without synthetic fallback.
        #[arg(long)]
        direct: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    Intraday,
    Daily,
}

impl From<GranularityArg> for Granularity {
    fn from(value: GranularityArg) -> Self {
        match value {
            GranularityArg::Intraday => Granularity::Intraday,
            GranularityArg::Daily => Granularity::Daily,
        }
    }
}
