use cipherforge::model::LanguageModel;
use clap::{Parser, Subcommand};
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Language model (JSON produced by the n-gram generator).
    #[arg(global = true, short, long, default_value = "data/quadgrams.json")]
    model: String,

    /// Seed for the search RNG; omit for fresh entropy per run.
    #[arg(global = true, short, long)]
    seed: Option<u64>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score text against the language model.
    Score(cmd::score::ScoreArgs),
    /// Recover the key and plaintext of a Playfair ciphertext.
    Playfair(cmd::playfair::PlayfairArgs),
    /// Recover the key and plaintext of a substitution ciphertext.
    Substitution(cmd::substitution::SubstitutionArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    let model = LanguageModel::from_file(&cli.model).unwrap_or_else(|e| {
        eprintln!("❌ failed to load language model: {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Score(args) => cmd::score::run(args, &model),
        Commands::Playfair(args) => cmd::playfair::run(args, &model, cli.seed),
        Commands::Substitution(args) => cmd::substitution::run(args, &model, cli.seed),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}
