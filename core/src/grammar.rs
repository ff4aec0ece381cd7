//! Component D: grammar builder (back-off n-gram WFST, `G`).
//!
//! Implements spec section 4.D. States are addressed through two maps keyed
//! by history (`uni[w]`, `bi[(h, w)]`), never through a per-state object
//! graph — the FST itself is the arena (spec section 9).

use crate::arpa::{parse_arpa, NGram};
use crate::error::BuildError;
use crate::symbols::{label_of, DISAMBIG_ZERO, EPS, SENTENCE_END, SENTENCE_START};
use crate::weight::arpa_field_to_weight;
use crate::wfst::{self, Graph, State};
use rustfst::{Label, SymbolTable};
use std::collections::HashMap;
use std::io::BufRead;

const HISTORY_EMPTY: &str = "<start>";

struct GrammarState {
    fst: Graph,
    uni: HashMap<String, State>,
    bi: HashMap<(String, String), State>,
    q_eps: State,
    eps_id: Label,
    disambig0_id: Label,
}

impl GrammarState {
    fn new(words: &SymbolTable) -> Result<Self, BuildError> {
        let mut fst = wfst::new_graph();
        let q_eps = wfst::add_state(&mut fst);
        wfst::set_start(&mut fst, q_eps)?;
        let q_s = wfst::add_state(&mut fst);
        // The source sets start twice; only the last call takes effect.
        // q_eps (state 0) ends up reachable only via back-off, never as an
        // entry point. This is intentional — preserve it.
        wfst::set_start(&mut fst, q_s)?;

        let mut uni = HashMap::new();
        uni.insert(HISTORY_EMPTY.to_string(), q_eps);
        uni.insert(SENTENCE_START.to_string(), q_s);

        Ok(Self {
            fst,
            uni,
            bi: HashMap::new(),
            q_eps,
            eps_id: label_of(words, EPS)?,
            disambig0_id: label_of(words, DISAMBIG_ZERO)?,
        })
    }

    fn backoff_destination(&mut self, word: &str) -> State {
        self.uni.get(word).copied().unwrap_or(self.q_eps)
    }

    fn process_unigram(
        &mut self,
        words: &SymbolTable,
        log10_prob: f64,
        word: &str,
        log10_backoff: Option<f64>,
    ) -> Result<(), BuildError> {
        if words.get_label(word).is_none() {
            tracing::info!(word, "unigram out of vocabulary, dropped");
            return Ok(());
        }
        let weight = arpa_field_to_weight(log10_prob);
        let boff = arpa_field_to_weight(log10_backoff.unwrap_or(0.0));

        if word == SENTENCE_END {
            wfst::set_final(&mut self.fst, self.q_eps, weight)
        } else if word == SENTENCE_START {
            let q_s = self.uni[SENTENCE_START];
            wfst::add_arc(&mut self.fst, q_s, self.disambig0_id, self.eps_id, boff, self.q_eps)
        } else {
            let word_id = label_of(words, word)?;
            let des = *self
                .uni
                .entry(word.to_string())
                .or_insert_with(|| wfst::add_state(&mut self.fst));
            wfst::add_arc(&mut self.fst, self.q_eps, word_id, word_id, weight, des)?;
            wfst::add_arc(&mut self.fst, des, self.disambig0_id, self.eps_id, boff, self.q_eps)
        }
    }

    fn process_bigram(
        &mut self,
        words: &SymbolTable,
        log10_prob: f64,
        hist: &str,
        word: &str,
        log10_backoff: Option<f64>,
    ) -> Result<(), BuildError> {
        if words.get_label(hist).is_none() || words.get_label(word).is_none() {
            tracing::info!(hist, word, "bigram out of vocabulary, dropped");
            return Ok(());
        }
        let Some(&src) = self.uni.get(hist) else {
            tracing::info!(hist, word, "bigram skipped: no parent (n-1)-gram exists");
            return Ok(());
        };
        let weight = arpa_field_to_weight(log10_prob);

        if word == SENTENCE_END {
            return wfst::set_final(&mut self.fst, src, weight);
        }

        let boff = arpa_field_to_weight(log10_backoff.unwrap_or(0.0));
        let key = (hist.to_string(), word.to_string());
        let des = if let Some(&s) = self.bi.get(&key) {
            s
        } else {
            let s = wfst::add_state(&mut self.fst);
            self.bi.insert(key, s);
            let boff_dst = self.backoff_destination(word);
            wfst::add_arc(&mut self.fst, s, self.disambig0_id, self.eps_id, boff, boff_dst)?;
            s
        };
        let word_id = label_of(words, word)?;
        wfst::add_arc(&mut self.fst, src, word_id, word_id, weight, des)
    }

    fn process_trigram(
        &mut self,
        words: &SymbolTable,
        log10_prob: f64,
        hist1: &str,
        hist2: &str,
        word: &str,
    ) -> Result<(), BuildError> {
        if words.get_label(hist1).is_none()
            || words.get_label(hist2).is_none()
            || words.get_label(word).is_none()
        {
            tracing::info!(hist1, hist2, word, "trigram out of vocabulary, dropped");
            return Ok(());
        }
        let bigram1 = (hist1.to_string(), hist2.to_string());
        let Some(&src) = self.bi.get(&bigram1) else {
            tracing::info!(hist1, hist2, word, "trigram skipped: no parent (n-1)-gram exists");
            return Ok(());
        };
        let weight = arpa_field_to_weight(log10_prob);

        if word == SENTENCE_END {
            return wfst::set_final(&mut self.fst, src, weight);
        }

        let bigram2 = (hist2.to_string(), word.to_string());
        let des = if let Some(&s) = self.bi.get(&bigram2) {
            s
        } else {
            let s = wfst::add_state(&mut self.fst);
            self.bi.insert(bigram2, s);
            let boff_dst = self.backoff_destination(word);
            wfst::add_arc(&mut self.fst, s, self.disambig0_id, self.eps_id, 0.0, boff_dst)?;
            s
        };
        let word_id = label_of(words, word)?;
        wfst::add_arc(&mut self.fst, src, word_id, word_id, weight, des)
    }

    fn dispatch(&mut self, words: &SymbolTable, ngram: NGram) -> Result<(), BuildError> {
        match ngram.order {
            1 => self.process_unigram(words, ngram.log10_prob, &ngram.words[0], ngram.log10_backoff),
            2 => self.process_bigram(
                words,
                ngram.log10_prob,
                &ngram.words[0],
                &ngram.words[1],
                ngram.log10_backoff,
            ),
            3 => self.process_trigram(
                words,
                ngram.log10_prob,
                &ngram.words[0],
                &ngram.words[1],
                &ngram.words[2],
            ),
            n => Err(BuildError::UnsupportedOrder(n)),
        }
    }

    /// Rewrite the sole `#0` back-off arc of any state that is otherwise a
    /// dead end (one arc, non-final) to `<eps>`, then let epsilon-removal
    /// delete it. Spec P6 / S6.
    fn remove_redundant_states(&mut self) -> Result<(), BuildError> {
        for state in wfst::states(&self.fst) {
            if wfst::num_arcs(&self.fst, state)? != 1 {
                continue;
            }
            if wfst::is_final(&self.fst, state)? {
                continue;
            }
            let mut arcs = wfst::arcs(&self.fst, state)?;
            if arcs[0].ilabel == self.disambig0_id {
                arcs[0].ilabel = self.eps_id;
                wfst::replace_arcs(&mut self.fst, state, arcs)?;
            }
        }
        wfst::remove_epsilons(&mut self.fst)
    }
}

/// Build the grammar WFST from an ARPA reader and a frozen word table.
/// Returns the FST arc-sorted by input label (spec section 6).
pub fn build_grammar<R: BufRead>(arpa: R, words: &SymbolTable) -> Result<Graph, BuildError> {
    let mut state = GrammarState::new(words)?;
    parse_arpa(arpa, |ngram| state.dispatch(words, ngram))?;
    state.remove_redundant_states()?;
    wfst::arc_sort_by_input(&mut state.fst);
    Ok(state.fst)
}
