/*!

  A directed graph with a distinguished root at index 0, stored as an
  indexed sequence of successor sets.

*/

use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<HashSet<usize>>,
}

impl Graph {
    /// A graph with only the root vertex (index 0) and no arcs.
    pub fn new() -> Graph {
        Graph {
            adjacency: vec![HashSet::new()],
        }
    }

    /// Build a graph from an iterator of `(from, to)` arcs.
    pub fn from_arcs(arcs: impl IntoIterator<Item = (usize, usize)>) -> Graph {
        let mut g = Graph::new();
        for (from, to) in arcs {
            g.add_arc(from, to);
        }
        g
    }

    fn ensure_vertex(&mut self, v: usize) {
        if v >= self.adjacency.len() {
            self.adjacency.resize_with(v + 1, HashSet::new);
        }
    }

    /// Add an arc `from -> to`, creating either endpoint's vertex if it
    /// doesn't exist yet. Idempotent.
    ///
    /// Panics if `to` is the root vertex -- arcs into the root are
    /// prohibited.
    pub fn add_arc(&mut self, from: usize, to: usize) {
        assert!(to != 0, "arcs to the root vertex are prohibited");
        self.ensure_vertex(from);
        self.ensure_vertex(to);
        self.adjacency[from].insert(to);
    }

    /// Number of vertices (the highest vertex index touched, plus one).
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    /// Successors of `v`.
    ///
    /// Panics if `v` is out of range -- querying a nonexistent vertex is a
    /// programmer error.
    pub fn successors(&self, v: usize) -> &HashSet<usize> {
        assert!(v < self.size(), "vertex {} out of range (size {})", v, self.size());
        &self.adjacency[v]
    }

    /// Whether the arc `from -> to` exists.
    pub fn has_arc(&self, from: usize, to: usize) -> bool {
        self.adjacency
            .get(from)
            .map(|s| s.contains(&to))
            .unwrap_or(false)
    }

    /// Depth-first preorder over vertices reachable from the root (index 0).
    pub fn dfs_order(&self) -> Vec<usize> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![0usize];
        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            order.push(node);
            for succ in self.successors(node) {
                if !visited.contains(succ) {
                    stack.push(*succ);
                }
            }
        }
        order
    }

    /// Print the graph to stdout, one arc per line as `from -> to`.
    pub fn dump(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (from, succs) in self.adjacency.iter().enumerate() {
            for to in succs {
                writeln!(f, "{} -> {}", from, to)?;
            }
        }
        Ok(())
    }
}
