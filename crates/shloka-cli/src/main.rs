//! Shloka CLI - semantic search over Bhagavad Gita verses.
//!
//! # Usage
//!
//! ```bash
//! # Search the default corpus
//! shloka "What did Krishna say about karma?"
//! shloka "svadharma" -n 5 --lang kannada
//! shloka "query" --json
//!
//! # Speak results and write a report
//! shloka "liberation" --speak --audio-dir out/ --html out/results.html
//!
//! # Several queries, embedding the corpus once
//! shloka --interactive
//! ```

mod audio;
mod config;
mod output;
mod report;
mod search;

use anyhow::{anyhow, Result};
use clap::Parser;
use shloka_core::config::{DEFAULT_TOP_K, MAX_TOP_K, MIN_TOP_K};
use shloka_core::i18n::Language;
use shloka_core::speech::{GoogleTts, SpeechSynthesizer, VerseAudio};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Directory for `--speak` clips when `--audio-dir` is not given
const DEFAULT_AUDIO_DIR: &str = "shloka-audio";

/// Semantic search over Bhagavad Gita verses.
///
/// Finds the verses closest in meaning to a question, in English or Kannada,
/// and can read them aloud.
#[derive(Parser)]
#[command(name = "shloka", version, about)]
struct Cli {
    /// Search query
    query: Option<String>,

    /// Number of results to return (1-10)
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_K, value_parser = parse_top_k)]
    top_k: usize,

    /// Interface language: english or kannada
    #[arg(short, long, default_value = "english")]
    lang: Language,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verse corpus JSON file
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Directory with model.safetensors, tokenizer.json and config.json
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Generate audio for the original verse and its translation
    #[arg(long)]
    speak: bool,

    /// Write generated audio as MP3 files into this directory
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Write an HTML report with embedded audio players
    #[arg(long)]
    html: Option<PathBuf>,

    /// Print example queries and exit
    #[arg(long)]
    examples: bool,

    /// Read queries line by line from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn needs_speech(&self) -> bool {
        self.speak || self.audio_dir.is_some() || self.html.is_some()
    }

    fn audio_dir(&self) -> Option<PathBuf> {
        match (&self.audio_dir, self.speak) {
            (Some(dir), _) => Some(dir.clone()),
            (None, true) if self.html.is_none() => Some(PathBuf::from(DEFAULT_AUDIO_DIR)),
            _ => None,
        }
    }
}

/// Report file for the `index`-th query of a session.
///
/// The first query writes to `base`; later ones get a numbered suffix, so
/// `results.html` is followed by `results-2.html`, `results-3.html`, ...
fn report_path(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index + 1, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index + 1),
    };
    base.with_file_name(name)
}

fn parse_top_k(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (MIN_TOP_K..=MAX_TOP_K).contains(&n) {
        Ok(n)
    } else {
        Err(format!("must be between {} and {}", MIN_TOP_K, MAX_TOP_K))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.examples {
        println!("{}", output::format_examples(cli.lang));
        return Ok(());
    }

    if cli.query.is_none() && !cli.interactive {
        eprintln!("No search query provided. Use --help for usage information.");
        std::process::exit(1);
    }

    let engine = search::load_engine(cli.corpus.as_ref(), cli.model_dir.as_ref()).await?;
    let text = cli.lang.ui_text();
    if !cli.json {
        eprintln!("{}", text.data_loaded);
    }

    let synthesizer = if cli.needs_speech() {
        Some(GoogleTts::new().map_err(|e| anyhow!("Failed to create speech client: {}", e))?)
    } else {
        None
    };
    let synthesizer = synthesizer.as_ref().map(|s| s as &dyn SpeechSynthesizer);

    let mut query_index = 0;
    if let Some(query) = &cli.query {
        run_query(&cli, &engine, synthesizer, query, query_index).await?;
        query_index += 1;
    }

    if cli.interactive {
        let stdin = std::io::stdin();
        loop {
            eprint!("{}: ", text.query_prompt);
            std::io::stderr().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if let Err(e) = run_query(&cli, &engine, synthesizer, query, query_index).await {
                eprintln!("Error: {:#}", e);
            }
            query_index += 1;
        }
    }

    Ok(())
}

/// Searches, prints results, and produces any requested audio and report.
///
/// `query_index` counts queries in this session and numbers the report file.
async fn run_query(
    cli: &Cli,
    engine: &search::Engine,
    synthesizer: Option<&dyn SpeechSynthesizer>,
    query: &str,
    query_index: usize,
) -> Result<()> {
    if !cli.json {
        eprintln!("{}", cli.lang.ui_text().searching);
    }
    let results = search::execute_search(engine, query, cli.top_k)?;

    let clips: Vec<VerseAudio> = match synthesizer {
        Some(synthesizer) => audio::generate_audio(synthesizer, &results, cli.lang).await,
        None => Vec::new(),
    };

    let audio_files = match cli.audio_dir() {
        Some(dir) => audio::write_audio_files(&dir, &results, &clips).await?,
        None => Vec::new(),
    };

    if let Some(base) = &cli.html {
        let path = report_path(base, query_index);
        report::write_html(&path, query, cli.lang, &results, &clips).await?;
    }

    let output = if cli.json {
        output::format_json(query, cli.lang, &results, &audio_files)
    } else {
        output::format_human(query, cli.lang, &results, &clips)
    };
    println!("{}", output);

    Ok(())
}
