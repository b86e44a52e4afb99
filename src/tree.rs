use std::collections::VecDeque;

use bit_set::BitSet;

use crate::dimacs::read_from_file;
use crate::error::{ProximityError, Result};

/** Vertex Id */
pub type VertexId = usize;

/** models an unrooted tree given by its adjacency lists.
The order of each adjacency list is kept as given: it decides every tie in the
breadth-first searches, hence the labeling itself.
*/
#[derive(Debug, Clone)]
pub struct TreeInstance {
    /// nb vertices
    n: usize,
    /// edges of the tree (i < j)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
}


impl TreeInstance {

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges (always n-1)
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// list of vertices adjacent to vertex u, in stored order
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// degree of u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// edge list
    pub fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }

    /// adjacency lists, as given at construction
    pub fn adj_lists(&self) -> &[Vec<VertexId>] { &self.adj_list }

    /// builds the edge list
    fn build_edges(adj_list:&[Vec<VertexId>]) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        for (i,l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i,*j));
                }
            }
        }
        res
    }

    /** constructor using an adjacency list.

    fails with `InvalidInput` if the lists do not describe a tree: empty, a neighbor
    out of range, a self loop, an edge listed twice or only on one side, a number of
    edges different from n-1, or a disconnected graph.
    */
    pub fn new(adj_list:Vec<Vec<VertexId>>) -> Result<Self> {
        let n = adj_list.len();
        if n == 0 {
            return Err(ProximityError::InvalidInput("empty tree".to_string()));
        }
        // every directed entry (u,v) must have its mirror (v,u), exactly once
        let mut arcs:Vec<(VertexId,VertexId)> = Vec::new();
        for (u,l) in adj_list.iter().enumerate() {
            for v in l {
                if *v >= n {
                    return Err(ProximityError::InvalidInput(
                        format!("neighbor {} of node {} out of range (n={})", v, u, n)
                    ));
                }
                if *v == u {
                    return Err(ProximityError::InvalidInput(format!("self loop on node {}", u)));
                }
                arcs.push((u,*v));
            }
        }
        arcs.sort_unstable();
        if let Some(w) = arcs.windows(2).find(|w| w[0] == w[1]) {
            return Err(ProximityError::InvalidInput(
                format!("edge ({},{}) listed twice", w[0].0, w[0].1)
            ));
        }
        if let Some((u,v)) = arcs.iter().find(|(u,v)| arcs.binary_search(&(*v,*u)).is_err()) {
            return Err(ProximityError::InvalidInput(
                format!("edge ({},{}) is not mirrored in the adjacency of {}", u, v, v)
            ));
        }
        let m = arcs.len() / 2; // m = (∑ d(v)) / 2
        if m != n-1 {
            return Err(ProximityError::InvalidInput(
                format!("a tree on {} nodes has {} edges, found {}", n, n-1, m)
            ));
        }
        // with n-1 edges, connected <=> acyclic
        let mut visited = BitSet::with_capacity(n);
        let mut queue = VecDeque::from(vec![0]);
        visited.insert(0);
        while let Some(u) = queue.pop_front() {
            for v in &adj_list[u] {
                if visited.insert(*v) { queue.push_back(*v); }
            }
        }
        if visited.len() != n {
            return Err(ProximityError::InvalidInput(
                format!("disconnected: {} of {} nodes reachable from 0", visited.len(), n)
            ));
        }
        let edges = Self::build_edges(&adj_list);
        Ok(Self { n, edges, adj_list })
    }

    /// creates an instance from a DIMACS-like tree file
    pub fn from_file(filename:&str) -> Result<Self> {
        let (_,_,adj_list) = read_from_file(filename)?;
        Self::new(adj_list)
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees:Vec<usize> = (0..self.nb_vertices()).map(|i|{ self.degree(i) }).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            println!("\t{} \t min degree", min);
            println!("\t{} \t max degree", max);
        }
        let nb_leaves = degrees.iter().filter(|d| **d <= 1).count();
        println!("\t{} \t leaves", nb_leaves);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_instance() {
        let inst = TreeInstance::new(vec![vec![1],vec![0,2],vec![1,3],vec![2]]).unwrap();
        assert_eq!(inst.nb_vertices(), 4);
        assert_eq!(inst.nb_edges(), 3);
        assert_eq!(inst.neighbors(1), &[0,2]);
        assert_eq!(inst.edges(), &[(0,1),(1,2),(2,3)]);
    }

    #[test]
    fn test_single_node() {
        let inst = TreeInstance::new(vec![vec![]]).unwrap();
        assert_eq!(inst.nb_vertices(), 1);
        assert_eq!(inst.nb_edges(), 0);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(TreeInstance::new(vec![]), Err(ProximityError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_asymmetric() {
        let res = TreeInstance::new(vec![vec![1],vec![2],vec![1]]);
        assert!(matches!(res, Err(ProximityError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_cycle_and_forest() {
        // triangle + isolated node: 3 edges on 4 nodes but disconnected
        let res = TreeInstance::new(vec![vec![1,2],vec![0,2],vec![0,1],vec![]]);
        assert!(matches!(res, Err(ProximityError::InvalidInput(_))));
        // triangle alone: too many edges
        let res = TreeInstance::new(vec![vec![1,2],vec![0,2],vec![0,1]]);
        assert!(matches!(res, Err(ProximityError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_out_of_range_and_loops() {
        assert!(TreeInstance::new(vec![vec![5],vec![0]]).is_err());
        assert!(TreeInstance::new(vec![vec![0,1],vec![0]]).is_err());
        assert!(TreeInstance::new(vec![vec![1,1],vec![0,0]]).is_err());
    }

    #[test]
    fn test_read_instance() {
        let inst = TreeInstance::from_file("insts/path4.tree").unwrap();
        assert_eq!(inst.nb_vertices(), 4);
        assert_eq!(inst.nb_edges(), 3);
        assert_eq!(inst.neighbors(0), &[1]);
    }
}
