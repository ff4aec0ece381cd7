//! End-to-end scenarios for the speller/lexicon builder (spec section 8:
//! S1, S2, S3; invariants P3, P4).

use graph_core::{symbols, wfst};
use rustfst::Label;
use std::io::Write;

fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn two_word_collision_has_two_distinct_paths_s1() {
    let dir = tempfile::tempdir().unwrap();
    let speller = write_file(&dir, "speller.txt", "A a\nB a\n");
    let chars = write_file(&dir, "characters.txt", "a\n<space>\n");

    let build = graph_core::build_lexicon(speller, chars, 0.5, "<space>").unwrap();

    let a_id = symbols::label_of(&build.word_table, "A").unwrap();
    let b_id = symbols::label_of(&build.word_table, "B").unwrap();

    // Both A and B must appear as an output label leaving the loop state
    // (state 1), each on its own arc, per the four-fixed-state topology.
    let loop_state = 1;
    let outputs: Vec<Label> = wfst::arcs(&build.fst, loop_state)
        .unwrap()
        .into_iter()
        .map(|arc| arc.olabel)
        .collect();
    assert!(outputs.contains(&a_id));
    assert!(outputs.contains(&b_id));
}

#[test]
fn prefix_collision_keeps_an_fst_build_s2() {
    let dir = tempfile::tempdir().unwrap();
    let speller = write_file(&dir, "speller.txt", "AN a n\nA a\n");
    let chars = write_file(&dir, "characters.txt", "a\nn\n<space>\n");

    let build = graph_core::build_lexicon(speller, chars, 0.5, "<space>").unwrap();
    assert!(wfst::states(&build.fst).len() > 4);
}

#[test]
fn empty_spelling_produces_a_singleton_disambig_path_s3() {
    let dir = tempfile::tempdir().unwrap();
    let speller = write_file(&dir, "speller.txt", "SIL\n");
    let chars = write_file(&dir, "characters.txt", "a\n<space>\n");

    let build = graph_core::build_lexicon(speller, chars, 0.5, "<space>").unwrap();

    let sil_word = symbols::label_of(&build.word_table, "SIL").unwrap();
    let loop_state = 1;
    let arcs = wfst::arcs(&build.fst, loop_state).unwrap();
    assert!(arcs.iter().any(|arc| arc.olabel == sil_word));
}

#[test]
fn missing_silence_symbol_is_a_fatal_unknown_symbol_error() {
    let dir = tempfile::tempdir().unwrap();
    let speller = write_file(&dir, "speller.txt", "A a\n");
    let chars = write_file(&dir, "characters.txt", "a\n");

    let err = graph_core::build_lexicon(speller, chars, 0.5, "SIL").unwrap_err();
    assert!(matches!(err, graph_core::BuildError::UnknownSymbol(_)));
}
