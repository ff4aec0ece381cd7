use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use graph_core::wfst;

/// Compile an ARPA back-off language model into a grammar transducer,
/// against a frozen word vocabulary.
#[derive(Parser)]
struct Args {
    /// ARPA-format language model file.
    #[arg(long)]
    arpa: PathBuf,

    /// Word symbol table: `word id` per line. Typically the `words.txt`
    /// emitted by `build_lexicon`, but may stand alone when this binary is
    /// invoked without a matching lexicon build.
    #[arg(long)]
    words: PathBuf,

    /// Output FST path (OpenFst binary format).
    #[arg(long, default_value = "G.fst")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let word_table = graph_core::read_word_table(&args.words)?;
    let fst = graph_core::build_grammar(&args.arpa, &word_table)?;

    wfst::write_binary(&fst, &args.out)?;
    println!("Wrote {} ({} states)", args.out.display(), wfst::states(&fst).len());

    Ok(())
}
