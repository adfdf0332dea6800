use anyhow::Result;
use clap::Parser;
use requery::{
    ConsoleCollector, GoogleSearchClient, QueryAugmenter, Session, Tokenizer,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Relevance-feedback query reformulation for web search", long_about = None)]
struct Args {
    /// Google API key
    #[arg(long, env = "GOOGLE_API_KEY")]
    api_key: String,

    /// Programmable Search Engine id
    #[arg(long, env = "SEARCH_ENGINE_ID")]
    engine_id: String,

    /// Target precision to reach before stopping
    #[arg(short, long, default_value_t = 0.9)]
    precision: f64,

    /// Stop-word list, one word per line; built-in English list when omitted
    #[arg(long)]
    stop_words: Option<PathBuf>,

    /// Initial query
    query: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    requery::ui::display_parameters(&args.engine_id, &args.query, args.precision);

    let tokenizer = match &args.stop_words {
        Some(path) => Tokenizer::from_stop_words_file(path)?,
        None => Tokenizer::new(),
    };
    let engine = QueryAugmenter::new().with_tokenizer(tokenizer);
    let client = GoogleSearchClient::new(args.api_key, args.engine_id);
    let mut collector = ConsoleCollector;

    let mut session = Session::new(&client, &mut collector, &engine, args.precision);
    let outcome = session.run(&args.query)?;

    println!("\n======================");
    if outcome.precision >= args.precision {
        println!(
            "Reached precision {:.2} after {} reformulation(s).",
            outcome.precision, outcome.iterations
        );
    } else {
        println!("No relevant results; stopping without further reformulation.");
    }
    println!("Final query: {}", outcome.query);

    Ok(())
}
