use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use graph_core::{symbols, wfst, BuildConfig};

/// Compile a speller lexicon (word -> spelling) into a lexicon transducer.
#[derive(Parser)]
struct Args {
    /// Speller file: one `WORD sym1 sym2 ...` entry per line.
    #[arg(long)]
    speller: PathBuf,

    /// Characters/phones inventory, one symbol per line.
    #[arg(long)]
    characters: PathBuf,

    /// Optional TOML config overriding p_sil / sil_symbol defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output FST path (OpenFst binary format).
    #[arg(long, default_value = "L.fst")]
    out: PathBuf,

    /// Output word symbol table.
    #[arg(long, default_value = "words.txt")]
    words_out: PathBuf,

    /// Output disambig-augmented character symbol table.
    #[arg(long, default_value = "characters_disambig.txt")]
    chars_out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match args.config {
        Some(path) => BuildConfig::load_toml(path).map_err(|e| anyhow::anyhow!(e))?,
        None => BuildConfig::default(),
    };

    let build = graph_core::build_lexicon(
        &args.speller,
        &args.characters,
        config.p_sil,
        &config.sil_symbol,
    )?;

    wfst::write_binary(&build.fst, &args.out)?;
    symbols::write_table(&build.word_table, &args.words_out)?;
    symbols::write_table(&build.char_table, &args.chars_out)?;

    println!(
        "Wrote {} ({} states, {} disambig symbols)",
        args.out.display(),
        wfst::states(&build.fst).len(),
        build.disambig_ids.len(),
    );
    println!("Wrote {}", args.words_out.display());
    println!("Wrote {}", args.chars_out.display());

    Ok(())
}
