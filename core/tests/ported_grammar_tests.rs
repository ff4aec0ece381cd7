//! End-to-end scenarios for the grammar builder (spec section 8: S4, S5, S6;
//! invariants P1, P2, P6).

use graph_core::{grammar, symbols, wfst};
use std::io::Cursor;

fn vocab_table(words: &[&str]) -> rustfst::SymbolTable {
    symbols::build_word_table(words.iter().copied())
}

#[test]
fn trigram_round_trip_s4() {
    let words = vocab_table(&["a", "b"]);
    let arpa = "\\data\\\n\
ngram 1=4\n\
\\1-grams:\n\
-2.0 <s> 0.0\n\
-1.0 </s>\n\
-1.0 a -0.2\n\
-1.0 b -0.2\n\
\\2-grams:\n\
-0.3 a b\n\
\\3-grams:\n\
-0.5 a b </s>\n\
\\end\\\n";

    let fst = grammar::build_grammar(Cursor::new(arpa), &words).unwrap();

    // G has >= 2 states and a non-null start (P2).
    assert!(wfst::states(&fst).len() >= 2);

    // </s> never appears as an arc label anywhere in the FST.
    let eos = symbols::label_of(&words, "</s>").unwrap();
    for state in wfst::states(&fst) {
        for arc in wfst::arcs(&fst, state).unwrap() {
            assert_ne!(arc.ilabel, eos);
        }
    }
}

#[test]
fn oov_bigram_is_dropped_s5() {
    let words = vocab_table(&["foo"]);
    let arpa = "\\1-grams:\n\
-1.0 <s> 0.0\n\
-1.0 </s>\n\
-1.0 foo 0.0\n\
\\2-grams:\n\
-0.5 foo bar\n\
\\end\\\n";

    // BAR is out of vocabulary; the build must still succeed with the
    // bigram silently dropped, not error out.
    let fst = grammar::build_grammar(Cursor::new(arpa), &words).unwrap();
    assert!(wfst::states(&fst).len() >= 2);
}

#[test]
fn unsupported_order_is_fatal() {
    let words = vocab_table(&["a"]);
    let arpa = "\\4-grams:\n-1.0 a a a a\n";
    let err = grammar::build_grammar(Cursor::new(arpa), &words).unwrap_err();
    assert!(matches!(err, graph_core::BuildError::UnsupportedOrder(4)));
}

#[test]
fn redundant_backoff_only_states_are_compacted_s6_p6() {
    // `h w` has no trigram continuation and no finality: after compaction
    // every remaining state either has >1 arc or is final (P6).
    let words = vocab_table(&["h", "w"]);
    let arpa = "\\1-grams:\n\
-1.0 <s> 0.0\n\
-1.0 </s>\n\
-1.0 h -0.1\n\
-1.0 w -0.1\n\
\\2-grams:\n\
-0.2 h w\n\
\\end\\\n";

    let fst = grammar::build_grammar(Cursor::new(arpa), &words).unwrap();

    for state in wfst::states(&fst) {
        let n = wfst::num_arcs(&fst, state).unwrap();
        let is_final = wfst::is_final(&fst, state).unwrap();
        if n == 1 && !is_final {
            let arcs = wfst::arcs(&fst, state).unwrap();
            let disambig0 = symbols::label_of(&words, "#0").unwrap();
            assert_ne!(
                arcs[0].ilabel, disambig0,
                "a lone #0 back-off arc should have been rewritten and removed"
            );
        }
    }
}
