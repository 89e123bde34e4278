use agent_readiness::config::{AppConfig, ContentConfig};
use agent_readiness::parsers::html::strip_tags;
use agent_readiness::{Analyzer, Result, server};
use clap::Parser;
use serde::Serialize;

mod args;
use args::{Args, Command, convert_fetcher};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(fetcher) = args.fetcher {
        config.fetch = convert_fetcher(fetcher);
    }

    match args.command {
        Command::Score { url, full } => {
            let analyzer = Analyzer::from_config(&config)?;
            let analysis = analyzer.score_url(&url).await?;
            if full {
                print_json(&analysis)
            } else {
                print_json(&analysis.result())
            }
        }
        Command::Content { file } => {
            let content = std::fs::read_to_string(&file)?;
            let analyzer = Analyzer::from_config(&config)?;
            print_json(&analyzer.analyze_content(&content))
        }
        Command::Keywords { file, count } => {
            let content = std::fs::read_to_string(&file)?;
            let analysis = match count {
                Some(keyword_count) => ContentConfig {
                    keyword_count,
                    ..config.analysis.clone()
                },
                None => config.analysis.clone(),
            };
            let analyzer = Analyzer::from_config(&config)?.with_content_config(analysis);
            print_json(&analyzer.extract_keywords(&strip_tags(&content)))
        }
        Command::Similarity { query, text } => {
            let analyzer = Analyzer::from_config(&config)?;
            print_json(&analyzer.similarity(&query, &text))
        }
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if matches!(config.fetch, agent_readiness::config::FetcherConfig::WebDriver { .. }) {
                ::log::info!(
                    "Scoring uses WebDriver; set WEBDRIVER_URL if not using the configured default"
                );
            }
            server::run_server(&config).await
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
