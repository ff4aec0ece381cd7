//! Thin seam over the external WFST library.
//!
//! Per spec, the FST data structure itself (states, arcs, arc-sort,
//! epsilon-removal) is an external collaborator. Everything in this module
//! is a direct call into `rustfst`'s `VectorFst<TropicalWeight>`; nothing
//! here encodes graph semantics. Keeping the calls in one place means the
//! grammar and speller builders read as pure graph-construction logic.

use crate::error::BuildError;
use rustfst::algorithms::rm_epsilon::rm_epsilon;
use rustfst::algorithms::tr_sort::{tr_sort, ILabelCompare, OLabelCompare};
use rustfst::prelude::*;

pub type Graph = VectorFst<TropicalWeight>;
pub type State = StateId;

pub fn new_graph() -> Graph {
    VectorFst::new()
}

pub fn add_state(fst: &mut Graph) -> State {
    fst.add_state()
}

pub fn set_start(fst: &mut Graph, state: State) -> Result<(), BuildError> {
    fst.set_start(state).map_err(|e| BuildError::Fst(e.to_string()))
}

pub fn set_final(fst: &mut Graph, state: State, weight: f32) -> Result<(), BuildError> {
    fst.set_final(state, TropicalWeight::new(weight))
        .map_err(|e| BuildError::Fst(e.to_string()))
}

pub fn is_final(fst: &Graph, state: State) -> Result<bool, BuildError> {
    let w = fst
        .final_weight(state)
        .map_err(|e| BuildError::Fst(e.to_string()))?;
    Ok(match w {
        Some(w) => w != TropicalWeight::zero(),
        None => false,
    })
}

pub fn add_arc(
    fst: &mut Graph,
    src: State,
    ilabel: Label,
    olabel: Label,
    weight: f32,
    dst: State,
) -> Result<(), BuildError> {
    fst.add_tr(src, Tr::new(ilabel, olabel, TropicalWeight::new(weight), dst))
        .map_err(|e| BuildError::Fst(e.to_string()))
}

/// Arcs currently leaving `state`, as an owned snapshot.
pub fn arcs(fst: &Graph, state: State) -> Result<Vec<Tr<TropicalWeight>>, BuildError> {
    Ok(fst
        .get_trs(state)
        .map_err(|e| BuildError::Fst(e.to_string()))?
        .trs()
        .to_vec())
}

pub fn num_arcs(fst: &Graph, state: State) -> Result<usize, BuildError> {
    fst.num_trs(state).map_err(|e| BuildError::Fst(e.to_string()))
}

/// Replace all outgoing arcs of `state` with `new_arcs`.
pub fn replace_arcs(
    fst: &mut Graph,
    state: State,
    new_arcs: Vec<Tr<TropicalWeight>>,
) -> Result<(), BuildError> {
    fst.delete_trs(state).map_err(|e| BuildError::Fst(e.to_string()))?;
    for tr in new_arcs {
        fst.add_tr(state, tr).map_err(|e| BuildError::Fst(e.to_string()))?;
    }
    Ok(())
}

pub fn states(fst: &Graph) -> Vec<State> {
    fst.states_iter().collect()
}

pub fn remove_epsilons(fst: &mut Graph) -> Result<(), BuildError> {
    rm_epsilon(fst).map_err(|e| BuildError::Fst(e.to_string()))
}

pub fn arc_sort_by_input(fst: &mut Graph) {
    tr_sort(fst, ILabelCompare {});
}

pub fn arc_sort_by_output(fst: &mut Graph) {
    tr_sort(fst, OLabelCompare {});
}

/// Serialize to the OpenFst binary format.
pub fn write_binary(fst: &Graph, path: impl AsRef<std::path::Path>) -> Result<(), BuildError> {
    fst.write(path).map_err(|e| BuildError::Fst(e.to_string()))
}
