//! graph-core
//!
//! Compiles two symbolic speech-recognition resources into weighted
//! finite-state transducers usable by a speech decoder:
//!
//! - an ARPA back-off trigram language model into a grammar transducer `G`
//!   ([`build_grammar`]);
//! - a speller lexicon (word -> character/phone spelling) into a lexicon
//!   transducer `L` with optional silence and disambiguation symbols
//!   ([`build_lexicon`]).
//!
//! Composing `L` and `G` (typically `L o G`, determinized and minimized) is
//! out of scope for this crate.

pub mod arpa;
pub mod config;
pub mod error;
pub mod grammar;
pub mod speller;
pub mod symbols;
pub mod weight;
pub mod wfst;

pub use config::BuildConfig;
pub use error::BuildError;
pub use wfst::Graph;

use rustfst::{Label, SymbolTable};
use std::io::BufReader;
use std::path::Path;

/// Output of [`build_lexicon`]: the lexicon FST, its word and
/// disambig-augmented character tables, and the explicit disambig-id list
/// (spec section 4.A contract, needed for downstream determinization).
pub struct LexiconBuild {
    pub fst: Graph,
    pub word_table: SymbolTable,
    pub char_table: SymbolTable,
    pub disambig_ids: Vec<Label>,
}

/// Build the lexicon transducer from a speller file and a characters file.
pub fn build_lexicon(
    speller_file: impl AsRef<Path>,
    chars_file: impl AsRef<Path>,
    p_sil: f32,
    sil_symbol: &str,
) -> Result<LexiconBuild, BuildError> {
    let speller_entries = speller::parse_speller(BufReader::new(std::fs::File::open(speller_file)?))?;
    let raw_chars = speller::parse_chars(BufReader::new(std::fs::File::open(chars_file)?))?;

    let augmented = speller::augment_disambig(&speller_entries);

    let word_table = symbols::build_word_table(speller_entries.iter().map(|e| e.word.as_str()));
    let (char_table, disambig_ids) =
        symbols::build_char_table(raw_chars.iter().map(|s| s.as_str()), augmented.max_disambig);
    let sil_disambig_id = *disambig_ids
        .last()
        .expect("char table always reserves at least #0 and the silence disambig");

    let fst = speller::build_lexicon_fst(
        &augmented.entries,
        &word_table,
        &char_table,
        p_sil,
        sil_symbol,
        sil_disambig_id,
    )?;

    Ok(LexiconBuild {
        fst,
        word_table,
        char_table,
        disambig_ids,
    })
}

/// Build the grammar transducer from an ARPA file against a frozen word
/// table (typically the one [`build_lexicon`] produced, or one loaded
/// standalone via [`read_word_table`]).
pub fn build_grammar(arpa_file: impl AsRef<Path>, word_table: &SymbolTable) -> Result<Graph, BuildError> {
    let reader = BufReader::new(std::fs::File::open(arpa_file)?);
    grammar::build_grammar(reader, word_table)
}

/// Read a standalone `word id` table file (spec section 6: "Input — Words
/// table file, when the grammar builder is invoked standalone").
///
/// Only the file's *ordering* by id is authoritative here, not the literal
/// id values: symbols are re-added to a fresh table in id-sorted order, so
/// `rustfst` reassigns them contiguously starting at `<eps> = 0`. This is
/// exact whenever the file's ids are already contiguous from 0 (the normal
/// case — e.g. a `words.txt` produced by [`build_lexicon`]). A table with
/// sparse or offset ids will round-trip its ordering but not its literal
/// numbers.
pub fn read_word_table(path: impl AsRef<Path>) -> Result<SymbolTable, BuildError> {
    use std::io::BufRead;

    let mut table = SymbolTable::new();
    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut pairs: Vec<(String, i64)> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let (Some(word), Some(id)) = (fields.next(), fields.next()) else {
            continue;
        };
        let id: i64 = id.parse().map_err(|_| BuildError::InvalidFormat {
            line: 0,
            section: 0,
            text: line.clone(),
        })?;
        pairs.push((word.to_string(), id));
    }
    pairs.sort_by_key(|(_, id)| *id);
    for (word, _) in pairs {
        table.add_symbol(&word);
    }
    Ok(table)
}
