//! Bron–Kerbosch clique search with Tomita pivoting.
//!
//! Vertex sets are kept as sorted `Vec<usize>` so results are deterministic
//! for a given graph.

use super::graph::AdjacencyGraph;

/// A largest clique of `graph`. Empty for an empty graph.
pub fn maximum_clique(graph: &AdjacencyGraph) -> Vec<usize> {
    let mut best: Vec<usize> = Vec::new();
    let candidates: Vec<usize> = (0..graph.len()).collect();
    search_maximum(graph, &mut Vec::new(), candidates, Vec::new(), &mut best);
    best.sort_unstable();
    best
}

/// A largest independent set: a maximum clique of the complement graph.
pub fn maximum_independent_set(graph: &AdjacencyGraph) -> Vec<usize> {
    maximum_clique(&graph.complement())
}

/// Vertex of `p ∪ x` with the most neighbours in `p`.
fn choose_pivot(graph: &AdjacencyGraph, p: &[usize], x: &[usize]) -> Option<usize> {
    p.iter()
        .chain(x.iter())
        .copied()
        .max_by_key(|&u| p.iter().filter(|&&v| graph.has_edge(u, v)).count())
}

fn neighbours_in(graph: &AdjacencyGraph, v: usize, set: &[usize]) -> Vec<usize> {
    set.iter().copied().filter(|&w| graph.has_edge(v, w)).collect()
}

/// Bron–Kerbosch restricted to branches that can still beat `best`.
fn search_maximum(
    graph: &AdjacencyGraph,
    r: &mut Vec<usize>,
    mut p: Vec<usize>,
    mut x: Vec<usize>,
    best: &mut Vec<usize>,
) {
    if p.is_empty() {
        if x.is_empty() && r.len() > best.len() {
            *best = r.clone();
        }
        return;
    }
    if r.len() + p.len() <= best.len() {
        return;
    }

    let pivot = choose_pivot(graph, &p, &x);
    let branch: Vec<usize> = p
        .iter()
        .copied()
        .filter(|&v| pivot.is_none_or(|u| !graph.has_edge(u, v)))
        .collect();

    for v in branch {
        r.push(v);
        search_maximum(
            graph,
            r,
            neighbours_in(graph, v, &p),
            neighbours_in(graph, v, &x),
            best,
        );
        r.pop();
        p.retain(|&w| w != v);
        x.push(v);
        if r.len() + p.len() <= best.len() {
            return;
        }
    }
}
