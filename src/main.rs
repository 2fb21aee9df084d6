//! CLI for rhymecore: exposes `AnalysisFlags` 1:1 as flags, reads lyrics
//! from an argument or stdin, prints the resulting rhyme clusters.

use clap::Parser;
use rhymecore::{analyze_with, AnalysisFlags, CacheStore, Collaborators, FilesystemCacheStore};

#[derive(Parser)]
#[command(name = "rhymecore")]
#[command(about = "Pronunciation-based rhyme detection for heterogeneous lyric text", long_about = None)]
struct Cli {
    /// Lyrics text to analyze (or read from stdin if not provided)
    lyrics: Option<String>,

    /// Enable multi-word and intra-word multisyllable rhyme detection
    #[arg(long)]
    multisyllable: bool,

    /// Route Devanagari/Hinglish tokens through script-specific phoneme
    /// mapping; when unset every token is treated as English
    #[arg(long)]
    multilingual: bool,

    /// Consult/populate the filesystem result cache. Optionally takes a
    /// directory; defaults to the platform cache directory
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = "")]
    cache: Option<String>,

    /// Print results as JSON instead of a human-readable listing
    #[arg(long)]
    json: bool,
}

fn main() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt::init();
    }

    let cli = Cli::parse();

    let lyrics = match cli.lyrics {
        Some(text) => text,
        None => {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .expect("failed to read lyrics from stdin");
            buffer
        }
    };

    let flags = AnalysisFlags {
        multisyllable: cli.multisyllable,
        multilingual: cli.multilingual,
        cache: cli.cache.is_some(),
        oracle: false,
    };

    let cache_store = cli.cache.as_ref().map(|dir| {
        if dir.is_empty() {
            FilesystemCacheStore::new(FilesystemCacheStore::default_dir())
        } else {
            FilesystemCacheStore::new(dir.as_str())
        }
    });

    let collaborators = Collaborators {
        cache_store: cache_store.as_ref().map(|s| s as &dyn CacheStore),
        ..Default::default()
    };

    let result = analyze_with(&lyrics, flags, collaborators);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result).expect("result is always serializable"));
        return;
    }

    if result.degraded {
        eprintln!("warning: analysis degraded (a collaborator was unavailable or failed)");
    }

    for cluster in &result.clusters {
        let words: Vec<&str> = cluster.members.iter().map(|m| m.surface.as_str()).collect();
        println!("{}", words.join(", "));
    }
}
