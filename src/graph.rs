use crate::util::BitSet;

/// Undirected multigraph on `n` vertices with a value attached to each edge.
///
/// `assign_vertex_values` does the Czech-Havas-Majewski assignment: a single
/// explicit-stack DFS that detects cycles and computes vertex values in one
/// pass. On success every edge `(u, v, e)` with `u != v` satisfies
/// `(vertex_values[u] + vertex_values[v]) mod n == e`.
#[derive(Debug)]
pub struct Graph {
    n: u64,
    adjacency: Vec<Vec<(u32, u64)>>,
    vertex_values: Vec<i64>,
}

impl Graph {
    pub fn new(n: u64) -> Self {
        Self {
            n,
            adjacency: vec![Vec::new(); n as usize],
            vertex_values: vec![-1; n as usize],
        }
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    /// Connects `u` and `v` with an edge carrying `edge_value`. Multi-edges
    /// and self-loops are both stored as-is; no de-duplication.
    pub fn connect(&mut self, u: u32, v: u32, edge_value: u64) {
        self.adjacency[u as usize].push((v, edge_value));
        self.adjacency[v as usize].push((u, edge_value));
    }

    /// Attempts to compute vertex values such that every edge's endpoints
    /// sum (mod n) to that edge's value. Returns `false` on the first cycle
    /// found, at which point `vertex_values()` is left in an undefined state
    /// and the graph must be discarded by the caller.
    pub fn assign_vertex_values(&mut self) -> bool {
        let n = self.n as usize;
        self.vertex_values = vec![-1; n];
        let mut visited = BitSet::new(n);

        for root in 0..n {
            if visited.test(root) {
                continue;
            }
            self.vertex_values[root] = 0;

            // (parent, vertex); parent is `None` only for the root.
            let mut stack: Vec<(Option<u32>, u32)> = vec![(None, root as u32)];
            while let Some((parent, v)) = stack.pop() {
                visited.set(v as usize);

                // Exactly one adjacency-list entry back to `parent` is the
                // traversal edge; skip it once. Any further entry pointing
                // at `parent` is a parallel edge and a genuine cycle.
                let mut skip_once = true;
                for &(nbr, edge_value) in &self.adjacency[v as usize] {
                    if skip_once && Some(nbr) == parent {
                        skip_once = false;
                        continue;
                    }
                    if visited.test(nbr as usize) {
                        return false;
                    }
                    stack.push((Some(v), nbr));
                    let vv = self.vertex_values[v as usize];
                    self.vertex_values[nbr as usize] =
                        (edge_value as i64 - vv).rem_euclid(self.n as i64);
                }
            }
        }

        debug_assert!(self.vertex_values.iter().all(|&v| v >= 0));
        true
    }

    /// Vertex values after a successful `assign_vertex_values`.
    pub fn vertex_values(&self) -> &[i64] {
        &self.vertex_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_is_acyclic() {
        let mut g = Graph::new(3);
        assert!(g.assign_vertex_values());
    }

    #[test]
    fn two_edges_assign_expected_values() {
        let mut g = Graph::new(3);
        g.connect(0, 1, 2);
        g.connect(1, 2, 1);
        assert!(g.assign_vertex_values());
        assert_eq!(g.vertex_values(), &[0, 2, 2]);
    }

    #[test]
    fn closing_triangle_is_cyclic() {
        let mut g = Graph::new(3);
        g.connect(0, 1, 2);
        g.connect(1, 2, 1);
        g.connect(0, 2, 0);
        assert!(!g.assign_vertex_values());
    }

    #[test]
    fn self_loop_is_cyclic() {
        let mut g = Graph::new(2);
        g.connect(0, 0, 0);
        assert!(!g.assign_vertex_values());
    }

    #[test]
    fn parallel_edges_to_parent_are_cyclic() {
        let mut g = Graph::new(2);
        g.connect(0, 1, 1);
        g.connect(0, 1, 1);
        assert!(!g.assign_vertex_values());
    }

    #[test]
    fn disconnected_components_each_root_at_zero() {
        let mut g = Graph::new(4);
        g.connect(0, 1, 3);
        g.connect(2, 3, 1);
        assert!(g.assign_vertex_values());
        let vv = g.vertex_values();
        assert_eq!(vv[0], 0);
        assert_eq!(vv[2], 0);
        assert_eq!((vv[0] + vv[1]).rem_euclid(4), 3);
        assert_eq!((vv[2] + vv[3]).rem_euclid(4), 1);
    }
}
