//! Component A: symbol tables.
//!
//! Builds the word table `W` and the disambig-augmented character table `C`
//! described in spec section 4.A. Both are frozen `rustfst::SymbolTable`s by
//! the time an FST is built against them.

use crate::error::BuildError;
use rustfst::{Label, SymbolTable};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

pub const EPS: &str = "<eps>";
pub const DISAMBIG_ZERO: &str = "#0";
pub const SENTENCE_START: &str = "<s>";
pub const SENTENCE_END: &str = "</s>";

/// Build the word table from the unique, lexicographically sorted set of
/// speller words, plus the reserved trailing symbols (spec 4.A.1-4).
pub fn build_word_table<'a>(words: impl Iterator<Item = &'a str>) -> SymbolTable {
    let unique: BTreeSet<&str> = words.collect();

    let mut table = SymbolTable::new();
    table.add_symbol(EPS);
    for word in unique {
        table.add_symbol(word);
    }
    table.add_symbol(DISAMBIG_ZERO);
    table.add_symbol(SENTENCE_START);
    table.add_symbol(SENTENCE_END);
    table
}

/// Build the disambig-augmented character table from the characters file
/// (in file order, deduplicated by first occurrence) and the maximum
/// disambig index assigned by the speller builder. Returns the table and
/// the explicit disambig-id list `{id(#0), ..., id(#D)}` (spec 4.A contract).
pub fn build_char_table<'a>(
    chars_in_order: impl Iterator<Item = &'a str>,
    max_disambig: u32,
) -> (SymbolTable, Vec<Label>) {
    let mut table = SymbolTable::new();
    table.add_symbol(EPS);

    let mut seen = std::collections::HashSet::new();
    for ch in chars_in_order {
        if seen.insert(ch.to_string()) {
            table.add_symbol(ch);
        }
    }

    // The silence-disambig is one past the highest index the speller
    // builder handed out.
    let sil_disambig = max_disambig + 1;
    let mut disambig_ids = Vec::with_capacity(sil_disambig as usize + 1);
    for d in 0..=sil_disambig {
        let sym = format!("#{d}");
        disambig_ids.push(table.add_symbol(&sym));
    }

    (table, disambig_ids)
}

pub fn label_of(table: &SymbolTable, symbol: &str) -> Result<Label, BuildError> {
    table
        .get_label(symbol)
        .ok_or_else(|| BuildError::UnknownSymbol(symbol.to_string()))
}

/// Write a symbol table as `<symbol> <id>` per line, in id order.
pub fn write_table(table: &SymbolTable, path: impl AsRef<Path>) -> Result<(), BuildError> {
    let mut out = std::fs::File::create(path)?;
    let mut entries: Vec<(Label, String)> = table
        .iter()
        .map(|(label, sym)| (label, sym.to_string()))
        .collect();
    entries.sort_by_key(|(label, _)| *label);
    for (label, sym) in entries {
        writeln!(out, "{sym} {label}")?;
    }
    Ok(())
}
