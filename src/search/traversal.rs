use std::collections::VecDeque;

use bit_set::BitSet;

use crate::tree::{TreeInstance, VertexId};

/** breadth-first visitation order of the tree from root.
Each node appears once, root first. Neighbors are scanned in their stored
order, which fixes every downstream tie-break.
*/
pub fn bfs_order(inst:&TreeInstance, root:VertexId) -> Vec<VertexId> {
    let mut visited = BitSet::with_capacity(inst.nb_vertices());
    let mut res = vec![root];
    let mut queue = VecDeque::from(vec![root]);
    visited.insert(root);
    while let Some(u) = queue.pop_front() {
        for v in inst.neighbors(u) {
            if visited.insert(*v) {
                res.push(*v);
                queue.push_back(*v);
            }
        }
    }
    res
}
