use agent_readiness::config::FetcherConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agent-readiness")]
#[command(about = "Scores how well web pages and content serve AI agents")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// How pages are fetched (overrides the configuration file)
    #[arg(short, long, value_enum, global = true)]
    pub fetcher: Option<FetcherArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a URL and score its agent readiness
    Score {
        url: String,

        /// Print the per-category analysis as well
        #[arg(long)]
        full: bool,
    },

    /// Suggestions for a content file (HTML or plain text)
    Content { file: PathBuf },

    /// Top keywords of a content file
    Keywords {
        file: PathBuf,

        /// Number of keywords
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Word-overlap relevance of a text to a query
    Similarity { query: String, text: String },

    /// Run the HTTP service
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FetcherArg {
    Http,
    Webdriver,
}

/// Convert from CLI fetcher choice to fetcher configuration
pub fn convert_fetcher(arg: FetcherArg) -> FetcherConfig {
    match arg {
        FetcherArg::Http => FetcherConfig::default(),
        FetcherArg::Webdriver => FetcherConfig::webdriver(),
    }
}
