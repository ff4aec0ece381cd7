//! Component B: speller/lexicon builder (`L`).
//!
//! Two responsibilities, matching spec section 4.B: augment raw spellings
//! with disambiguation symbols until the set is prefix-free and duplicate
//! free (I5/P3), then emit the lexicon WFST with optional inter-word
//! silence (I4).

use crate::error::BuildError;
use crate::symbols::{label_of, EPS};
use crate::wfst::{self, Graph};
use rustfst::{Label, SymbolTable};
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

/// One `word char1 char2 ...` line from the speller file, before
/// disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellerEntry {
    pub word: String,
    pub spelling: Vec<String>,
}

pub fn parse_speller<R: BufRead>(reader: R) -> Result<Vec<SpellerEntry>, BuildError> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(word) = fields.next() else {
            continue;
        };
        entries.push(SpellerEntry {
            word: word.to_string(),
            spelling: fields.map(|s| s.to_string()).collect(),
        });
    }
    Ok(entries)
}

pub fn parse_chars<R: BufRead>(reader: R) -> Result<Vec<String>, BuildError> {
    let mut chars = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(ch) = line.split_whitespace().next() {
            chars.push(ch.to_string());
        }
    }
    Ok(chars)
}

/// Result of disambiguation augmentation: the augmented entries (I3/P3
/// guarantee prefix-freeness and uniqueness) plus the highest disambig
/// index handed out.
pub struct Augmented {
    pub entries: Vec<SpellerEntry>,
    pub max_disambig: u32,
}

/// Add disambiguation symbols to spellings per spec section 4.B.
///
/// An entry needs a suffix iff its spelling is duplicated, is a proper
/// prefix of some other entry's spelling, or is empty. Minimal-assignment
/// policy: try index 1, 2, ... per distinct spelling, skipping indices
/// already reserved for empty-spelling entries.
pub fn augment_disambig(entries: &[SpellerEntry]) -> Augmented {
    let mut count: HashMap<String, u32> = HashMap::new();
    let mut is_proper_prefix: HashSet<String> = HashSet::new();

    for entry in entries {
        let joined = entry.spelling.join(" ");
        *count.entry(joined).or_insert(0) += 1;

        if !entry.spelling.is_empty() {
            let mut prefix = entry.spelling.clone();
            prefix.pop();
            while !prefix.is_empty() {
                is_proper_prefix.insert(prefix.join(" "));
                prefix.pop();
            }
        }
    }

    let mut max_disambig: u32 = 0;
    let mut reserved: HashSet<u32> = HashSet::new();
    let mut next_for: HashMap<String, u32> = HashMap::new();
    let mut augmented = Vec::with_capacity(entries.len());

    for entry in entries {
        let joined = entry.spelling.join(" ");
        let needs_disambig =
            entry.spelling.is_empty() || count[&joined] > 1 || is_proper_prefix.contains(&joined);

        if !needs_disambig {
            augmented.push(entry.clone());
            continue;
        }

        let mut spelling = entry.spelling.clone();
        if entry.spelling.is_empty() {
            max_disambig += 1;
            reserved.insert(max_disambig);
            spelling = vec![format!("#{max_disambig}")];
        } else {
            let mut candidate = next_for.get(&joined).copied().unwrap_or(0) + 1;
            while reserved.contains(&candidate) {
                candidate += 1;
            }
            if candidate > max_disambig {
                max_disambig = candidate;
            }
            next_for.insert(joined, candidate);
            spelling.push(format!("#{candidate}"));
        }

        augmented.push(SpellerEntry {
            word: entry.word.clone(),
            spelling,
        });
    }

    Augmented {
        entries: augmented,
        max_disambig,
    }
}

/// Emit the lexicon WFST (spec section 4.B topology table), arc-sorted by
/// output label.
pub fn build_lexicon_fst(
    augmented: &[SpellerEntry],
    words: &SymbolTable,
    chars: &SymbolTable,
    p_sil: f32,
    sil_symbol: &str,
    sil_disambig_id: Label,
) -> Result<Graph, BuildError> {
    if chars.get_label(sil_symbol).is_none() {
        return Err(BuildError::UnknownSymbol(sil_symbol.to_string()));
    }

    let sil_cost = -p_sil.ln();
    let no_sil_cost = -(1.0 - p_sil).ln();

    let eps_char = label_of(chars, EPS)?;
    let eps_word = label_of(words, EPS)?;
    let disambig0_char = label_of(chars, "#0")?;
    let disambig0_word = label_of(words, "#0")?;
    let sil_char = label_of(chars, sil_symbol)?;

    let mut fst = wfst::new_graph();
    let start = wfst::add_state(&mut fst);
    let loop_state = wfst::add_state(&mut fst);
    let sil_state = wfst::add_state(&mut fst);
    let disambig_state = wfst::add_state(&mut fst);

    wfst::set_start(&mut fst, start)?;
    wfst::add_arc(&mut fst, start, eps_char, eps_word, no_sil_cost, loop_state)?;
    wfst::add_arc(&mut fst, start, sil_char, eps_word, sil_cost, disambig_state)?;
    wfst::add_arc(&mut fst, sil_state, sil_char, eps_word, 0.0, disambig_state)?;
    wfst::add_arc(&mut fst, disambig_state, sil_disambig_id, eps_word, 0.0, loop_state)?;

    for entry in augmented {
        let word_id = label_of(words, &entry.word)?;
        let char_ids: Vec<Label> = entry
            .spelling
            .iter()
            .map(|c| label_of(chars, c))
            .collect::<Result<_, _>>()?;

        if char_ids.len() == 1 {
            // Single-symbol spelling: the one arc is both the word's first
            // and last arc, so it must carry the word label, not eps.
            let c = char_ids[0];
            wfst::add_arc(&mut fst, loop_state, c, word_id, no_sil_cost, loop_state)?;
            wfst::add_arc(&mut fst, loop_state, c, word_id, sil_cost, sil_state)?;
            continue;
        }

        let mut src = loop_state;
        for (pos, &char_id) in char_ids[..char_ids.len() - 1].iter().enumerate() {
            let des = wfst::add_state(&mut fst);
            let olabel = if pos == 0 { word_id } else { eps_word };
            wfst::add_arc(&mut fst, src, char_id, olabel, 0.0, des)?;
            src = des;
        }
        let last = *char_ids.last().unwrap();
        wfst::add_arc(&mut fst, src, last, eps_word, no_sil_cost, loop_state)?;
        wfst::add_arc(&mut fst, src, last, eps_word, sil_cost, sil_state)?;
    }

    wfst::set_final(&mut fst, loop_state, 0.0)?;
    wfst::add_arc(&mut fst, loop_state, disambig0_char, disambig0_word, 0.0, loop_state)?;

    wfst::arc_sort_by_output(&mut fst);
    Ok(fst)
}
