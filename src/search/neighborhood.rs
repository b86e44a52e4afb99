use std::collections::VecDeque;
use std::convert::Infallible;

use bit_set::BitSet;

use crate::error::{ProximityError, Result};
use crate::labeling::{Label, Labeling};
use crate::tree::{TreeInstance, VertexId};

/** decides, during a breadth-first expansion, whether newly discovered nodes
are still admitted in the neighborhood.
*/
trait StoppingRule {
    /// error raised when admitting a node
    type Error;

    /// true while new nodes may be admitted
    fn is_open(&self) -> bool;

    /// records the admission of v
    fn admit(&mut self, v:VertexId) -> std::result::Result<(), Self::Error>;
}

/** breadth-first expansion from source shared by both neighborhood queries.
The source is admitted first. Afterwards, a discovered node is admitted only while
the rule is open; the rule may close in the middle of a neighbor list.
*/
fn expand<R:StoppingRule>(
    inst:&TreeInstance,
    source:VertexId,
    rule:&mut R
) -> std::result::Result<Vec<VertexId>, R::Error> {
    let mut visited = BitSet::with_capacity(inst.nb_vertices());
    let mut res = vec![source];
    let mut queue = VecDeque::from(vec![source]);
    visited.insert(source);
    rule.admit(source)?;
    while rule.is_open() {
        let u = match queue.pop_front() {
            None => break, // frontier exhausted
            Some(u) => u
        };
        for v in inst.neighbors(u) {
            if !visited.contains(*v) && rule.is_open() {
                visited.insert(*v);
                rule.admit(*v)?;
                res.push(*v);
                queue.push_back(*v);
            }
        }
    }
    Ok(res)
}


/// admits nodes until k of them are accepted, collecting their labels
struct CountRule<'a> {
    k: usize,
    nb_accepted: usize,
    labeling: &'a Labeling,
    used_labels: Vec<Label>,
}

impl<'a> StoppingRule for CountRule<'a> {
    type Error = Infallible;

    fn is_open(&self) -> bool { self.nb_accepted < self.k }

    fn admit(&mut self, v:VertexId) -> std::result::Result<(), Infallible> {
        self.nb_accepted += 1;
        if let Some(l) = self.labeling.get(v) {
            self.used_labels.push(l);
        }
        Ok(())
    }
}

/** k-nearest-node neighborhood of source.

returns the first min(k,n) nodes discovered by a breadth-first search from source
(source included, k ≥ 1 expected), and the labels already assigned among them in
discovery order. Unassigned nodes contribute no label; an imperfect partial labeling
may produce duplicates.
*/
pub fn count_neighborhood(
    inst:&TreeInstance,
    source:VertexId,
    k:usize,
    labeling:&Labeling
) -> (Vec<VertexId>, Vec<Label>) {
    let mut rule = CountRule { k, nb_accepted:0, labeling, used_labels:Vec::new() };
    let nodes = match expand(inst, source, &mut rule) {
        Ok(nodes) => nodes,
        Err(e) => match e {},
    };
    (nodes, rule.used_labels)
}


/// admits nodes until every label of [0, k-1] has been seen once
struct LabelRule<'a> {
    source: VertexId,
    k: usize,
    labeling: &'a Labeling,
    pending: BitSet,
}

impl<'a> StoppingRule for LabelRule<'a> {
    type Error = ProximityError;

    fn is_open(&self) -> bool { !self.pending.is_empty() }

    fn admit(&mut self, v:VertexId) -> Result<()> {
        let label = self.labeling.get(v).ok_or(ProximityError::UnlabeledNode(v))?;
        if label >= self.k {
            return Err(ProximityError::LabelOutOfRange { node:v, label, k:self.k });
        }
        if !self.pending.remove(label) {
            return Err(ProximityError::DuplicateLabelInNeighborhood {
                source_node: self.source, node:v, label
            });
        }
        Ok(())
    }
}

/** label-diverse neighborhood of source (on a complete labeling).

returns the nodes discovered by a breadth-first search from source until all k
labels have been seen. Stops early if the tree is exhausted (some label is used
nowhere reachable).

fails with:
 - `DuplicateLabelInNeighborhood` if a label is seen twice before all labels were seen
 - `LabelOutOfRange` if an admitted node has a label ≥ k
 - `UnlabeledNode` if an admitted node has no label
*/
pub fn label_neighborhood(
    inst:&TreeInstance,
    source:VertexId,
    k:usize,
    labeling:&Labeling
) -> Result<Vec<VertexId>> {
    let mut rule = LabelRule {
        source, k, labeling,
        pending: (0..k).collect(),
    };
    expand(inst, source, &mut rule)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn star4() -> TreeInstance {
        TreeInstance::new(vec![vec![1,2,3],vec![0],vec![0],vec![0]]).unwrap()
    }

    fn path5() -> TreeInstance {
        TreeInstance::new(vec![vec![1],vec![0,2],vec![1,3],vec![2,4],vec![3]]).unwrap()
    }

    #[test]
    fn test_count_stops_mid_neighbor_list() {
        let labeling = Labeling::unassigned(4);
        let (nodes, used) = count_neighborhood(&star4(), 0, 3, &labeling);
        assert_eq!(nodes, vec![0,1,2]);
        assert!(used.is_empty());
    }

    #[test]
    fn test_count_from_leaf() {
        let labeling = Labeling::from_labels(&[0,1,1,1]);
        let (nodes, used) = count_neighborhood(&star4(), 2, 3, &labeling);
        assert_eq!(nodes, vec![2,0,1]);
        assert_eq!(used, vec![1,0,1]);
    }

    #[test]
    fn test_count_size_is_min_k_n() {
        let labeling = Labeling::unassigned(5);
        for k in 1..8 {
            for v in 0..5 {
                let (nodes, _) = count_neighborhood(&path5(), v, k, &labeling);
                assert_eq!(nodes.len(), k.min(5));
                assert_eq!(nodes[0], v);
            }
        }
    }

    #[test]
    fn test_count_skips_unassigned_labels() {
        let mut labeling = Labeling::unassigned(5);
        labeling.assign(3, 1).unwrap();
        let (nodes, used) = count_neighborhood(&path5(), 2, 3, &labeling);
        assert_eq!(nodes, vec![2,1,3]);
        assert_eq!(used, vec![1]);
    }

    #[test]
    fn test_label_neighborhood() {
        let labeling = Labeling::from_labels(&[0,1,2,0,1]);
        assert_eq!(label_neighborhood(&path5(), 0, 3, &labeling).unwrap(), vec![0,1,2]);
        assert_eq!(label_neighborhood(&path5(), 2, 3, &labeling).unwrap(), vec![2,1,3]);
        assert_eq!(label_neighborhood(&path5(), 4, 3, &labeling).unwrap(), vec![4,3,2]);
    }

    #[test]
    fn test_label_neighborhood_k1() {
        let labeling = Labeling::from_labels(&[0,0,0,0,0]);
        assert_eq!(label_neighborhood(&path5(), 3, 1, &labeling).unwrap(), vec![3]);
    }

    #[test]
    fn test_label_neighborhood_duplicate() {
        let labeling = Labeling::from_labels(&[0,0,1,2,1]);
        let res = label_neighborhood(&path5(), 0, 3, &labeling);
        assert!(matches!(
            res,
            Err(ProximityError::DuplicateLabelInNeighborhood { source_node:0, node:1, label:0 })
        ));
    }

    #[test]
    fn test_label_neighborhood_out_of_range_and_unlabeled() {
        let labeling = Labeling::from_labels(&[0,4,1,2,1]);
        assert!(matches!(
            label_neighborhood(&path5(), 0, 3, &labeling),
            Err(ProximityError::LabelOutOfRange { node:1, label:4, k:3 })
        ));
        let mut partial = Labeling::unassigned(5);
        partial.assign(0, 0).unwrap();
        assert!(matches!(
            label_neighborhood(&path5(), 0, 2, &partial),
            Err(ProximityError::UnlabeledNode(1))
        ));
    }

    #[test]
    fn test_label_neighborhood_missing_label_exhausts_tree() {
        // label 2 is used nowhere: the whole tree is returned
        let inst = TreeInstance::new(vec![vec![1],vec![0]]).unwrap();
        let labeling = Labeling::from_labels(&[0,1]);
        assert_eq!(label_neighborhood(&inst, 1, 3, &labeling).unwrap(), vec![1,0]);
    }
}
