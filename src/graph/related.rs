//! Relevance expansion: bounded bidirectional breadth-first search.

use crate::graph::ImportGraph;
use std::collections::{HashMap, HashSet, VecDeque};

/// Return up to `limit` files related to `start`, in discovery order.
///
/// Relevance is symmetric even though the graph is directed, so the search
/// walks both what a node imports and what imports it; the transpose index is
/// built once up front. Nodes discovered at depth 1..=hops are eligible;
/// `start` itself is never emitted, and the visited set makes cycles
/// terminate. The limit cuts off mid-level: first-discovered order wins, with
/// no fairness across nodes at the same depth.
pub fn related_files(graph: &ImportGraph, start: &str, hops: usize, limit: usize) -> Vec<String> {
    if hops == 0 || limit == 0 {
        return Vec::new();
    }

    // BTreeMap iteration keeps reverse adjacency lists deterministic.
    let mut reverse: HashMap<&str, Vec<&str>> = HashMap::new();
    for (file, node) in &graph.files {
        for import in &node.imports {
            reverse.entry(import.as_str()).or_default().push(file);
        }
    }

    let mut seen: HashSet<&str> = HashSet::from([start]);
    let mut out: Vec<String> = Vec::new();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(start, 0usize)]);

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= hops {
            continue;
        }
        let forward = graph
            .files
            .get(current)
            .map(|n| n.imports.as_slice())
            .unwrap_or_default();
        let backward = reverse.get(current).map(Vec::as_slice).unwrap_or_default();

        for neighbor in forward.iter().map(String::as_str).chain(backward.iter().copied()) {
            if !seen.insert(neighbor) {
                continue;
            }
            out.push(neighbor.to_string());
            if out.len() >= limit {
                return out;
            }
            queue.push_back((neighbor, depth + 1));
        }
    }
    out
}
