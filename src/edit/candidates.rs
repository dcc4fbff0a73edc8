//! Candidate selection for one orchestration request.

use crate::graph::{related_files, ImportGraph};

/// The bounded set of files eligible for editing in one request.
///
/// Always contains the entry file, in first position; the rest come from
/// relevance expansion in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    pub entry: String,
    pub paths: Vec<String>,
}

impl CandidateSet {
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Select candidates for `entry`.
///
/// With a graph: `{entry} ∪ related(graph, entry, hops, limit)`, capped to
/// `cap` files total. Without one (`None`): just the entry — a missing graph
/// is a normal degradation, not an error.
pub fn select_candidates(
    graph: Option<&ImportGraph>,
    entry: &str,
    hops: usize,
    related_limit: usize,
    cap: usize,
) -> CandidateSet {
    let mut paths = vec![entry.to_string()];
    if let Some(graph) = graph {
        for path in related_files(graph, entry, hops, related_limit) {
            if paths.len() >= cap {
                break;
            }
            if path != entry {
                paths.push(path);
            }
        }
    }
    CandidateSet {
        entry: entry.to_string(),
        paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{FileNode, GRAPH_VERSION};
    use std::collections::BTreeMap;

    fn chain_graph() -> ImportGraph {
        let mut files = BTreeMap::new();
        files.insert(
            "a.ts".to_string(),
            FileNode {
                imports: vec!["b.ts".to_string()],
            },
        );
        files.insert(
            "b.ts".to_string(),
            FileNode {
                imports: vec!["c.ts".to_string()],
            },
        );
        files.insert("c.ts".to_string(), FileNode::default());
        ImportGraph {
            version: GRAPH_VERSION,
            root_dir: "/proj".to_string(),
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
            files,
        }
    }

    #[test]
    fn entry_is_always_first() {
        let set = select_candidates(Some(&chain_graph()), "a.ts", 2, 20, 30);
        assert_eq!(set.paths, vec!["a.ts", "b.ts", "c.ts"]);
        assert_eq!(set.entry, "a.ts");
    }

    #[test]
    fn missing_graph_yields_entry_only() {
        let set = select_candidates(None, "a.ts", 2, 20, 30);
        assert_eq!(set.paths, vec!["a.ts"]);
    }

    #[test]
    fn cap_bounds_the_set_including_entry() {
        let set = select_candidates(Some(&chain_graph()), "a.ts", 2, 20, 2);
        assert_eq!(set.paths, vec!["a.ts", "b.ts"]);
    }

    #[test]
    fn entry_absent_from_graph_yields_entry_only() {
        let set = select_candidates(Some(&chain_graph()), "new-file.ts", 2, 20, 30);
        assert_eq!(set.paths, vec!["new-file.ts"]);
    }
}
