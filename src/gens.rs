use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::Result;
use crate::tree::{TreeInstance, VertexId};

/** random tree on n nodes (n ≥ 1).
node i > 0 attaches to a uniform node among 0..i, then node ids and the order of
every adjacency list are shuffled (so that traversal ties are random as well).
*/
pub fn random_tree<R:Rng>(n:usize, rng:&mut R) -> Result<TreeInstance> {
    TreeInstance::new(random_adj_lists(n, rng))
}

/// adjacency lists of a random tree (see `random_tree`)
pub fn random_adj_lists<R:Rng>(n:usize, rng:&mut R) -> Vec<Vec<VertexId>> {
    let mut adj_list:Vec<Vec<VertexId>> = vec![Vec::new() ; n];
    for i in 1..n {
        let p = rng.gen_range(0..i);
        adj_list[i].push(p);
        adj_list[p].push(i);
    }
    let mut perm:Vec<VertexId> = (0..n).collect();
    perm.shuffle(rng);
    let mut res:Vec<Vec<VertexId>> = vec![Vec::new() ; n];
    for (old,l) in adj_list.into_iter().enumerate() {
        let mut renamed:Vec<VertexId> = l.into_iter().map(|v| perm[v]).collect();
        renamed.shuffle(rng);
        res[perm[old]] = renamed;
    }
    res
}

/// path 0-1-...-(n-1)
pub fn path_tree(n:usize) -> Result<TreeInstance> {
    let adj_list = (0..n).map(|i| {
        let mut l = Vec::new();
        if i > 0 { l.push(i-1); }
        if i+1 < n { l.push(i+1); }
        l
    }).collect();
    TreeInstance::new(adj_list)
}

/// star with center 0 and leaves 1..n-1
pub fn star_tree(n:usize) -> Result<TreeInstance> {
    let adj_list = (0..n).map(|i| {
        if i == 0 { (1..n).collect() } else { vec![0] }
    }).collect();
    TreeInstance::new(adj_list)
}
