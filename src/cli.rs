use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "esports tournament tracker backed by Liquipedia tables")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Scrape a Liquipedia tournament table and store its tournaments
    Submit {
        /// Page URL, e.g. https://liquipedia.net/dota2/Tier_1_Tournaments
        url: String,
    },
    /// Print live, upcoming and past tournaments
    Overview {
        /// Only this game (as it appears in the URL, e.g. dota2)
        #[arg(short, long)]
        game: Option<String>,
        /// Only this tier id
        #[arg(short, long)]
        tier: Option<i64>,
    },
    /// List saved pages that can be re-submitted without fetching
    Pages,
    /// Print shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
