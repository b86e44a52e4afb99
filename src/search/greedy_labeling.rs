use bit_set::BitSet;
use tracing::debug;

use crate::error::{ProximityError, Result};
use crate::labeling::{Label, Labeling};
use crate::search::neighborhood::count_neighborhood;
use crate::search::traversal::bfs_order;
use crate::tree::{TreeInstance, VertexId};

/// checks k ∈ [1, n] and root ∈ [0, n-1]
pub fn check_parameters(inst:&TreeInstance, root:VertexId, k:usize) -> Result<()> {
    let n = inst.nb_vertices();
    if k == 0 || k > n {
        return Err(ProximityError::InvalidInput(format!("k={} outside [1, {}]", k, n)));
    }
    if root >= n {
        return Err(ProximityError::InvalidInput(format!("root {} outside [0, {})", root, n)));
    }
    Ok(())
}

/** implements the greedy proximity labeling.
    1. visit the nodes in breadth-first order from root
    2. compute the k nearest nodes of the current node (under the labeling built so far)
    3. list the labels of [0, k-1] not used among them, in increasing order
    4. give the smallest remaining ones to the unlabeled nodes of the neighborhood,
       in discovery order

Fails with `InvalidInput` if k or root are out of range, and with `AllocationExhausted`
if some neighborhood holds more unlabeled nodes than unused labels (nothing is assigned
for that neighborhood then).

parameters:
 - inst: tree to label
 - root: start of the traversal
 - k: number of labels
*/
pub fn greedy_labeling(inst:&TreeInstance, root:VertexId, k:usize) -> Result<Labeling> {
    check_parameters(inst, root, k)?;
    let mut labeling = Labeling::unassigned(inst.nb_vertices());
    for v in bfs_order(inst, root) {
        label_neighborhood_of(inst, v, k, &mut labeling)?;
    }
    debug!(n=inst.nb_vertices(), k, root, "labeling completed");
    Ok(labeling)
}

/// greedy step for node v: labels the unlabeled members of its k nearest nodes
fn label_neighborhood_of(
    inst:&TreeInstance,
    v:VertexId,
    k:usize,
    labeling:&mut Labeling
) -> Result<()> {
    let (nbhd, used_labels) = count_neighborhood(inst, v, k, labeling);
    let used:BitSet = used_labels.into_iter().collect();
    let available:Vec<Label> = (0..k).filter(|l| !used.contains(*l)).collect();
    let unassigned:Vec<VertexId> = nbhd.into_iter()
        .filter(|u| !labeling.is_assigned(*u))
        .collect();
    if unassigned.len() > available.len() {
        return Err(ProximityError::AllocationExhausted {
            node: v,
            unassigned: unassigned.len(),
            available: available.len(),
        });
    }
    for (u,l) in unassigned.iter().zip(available.iter()) {
        labeling.assign(*u, *l)?;
    }
    if !unassigned.is_empty() {
        debug!(node=v, nb_new=unassigned.len(), "neighborhood labeled");
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::labeling::{validate, ValidityIssue};

    fn path4() -> TreeInstance {
        TreeInstance::new(vec![vec![1],vec![0,2],vec![1,3],vec![2]]).unwrap()
    }

    fn star4() -> TreeInstance {
        TreeInstance::new(vec![vec![1,2,3],vec![0],vec![0],vec![0]]).unwrap()
    }

    #[test]
    fn test_path_alternates() {
        let inst = path4();
        let labeling = greedy_labeling(&inst, 0, 2).unwrap();
        assert_eq!(labeling.to_labels().unwrap(), vec![0,1,0,1]);
        assert!(validate(&inst, 2, &labeling).is_empty());
    }

    #[test]
    fn test_star_center_first() {
        let inst = star4();
        let labeling = greedy_labeling(&inst, 0, 2).unwrap();
        assert_eq!(labeling.to_labels().unwrap(), vec![0,1,1,1]);
    }

    #[test]
    fn test_k1_all_zero() {
        let inst = star4();
        let labeling = greedy_labeling(&inst, 2, 1).unwrap();
        assert_eq!(labeling.to_labels().unwrap(), vec![0,0,0,0]);
    }

    #[test]
    fn test_k_equals_n() {
        let inst = path4();
        let labeling = greedy_labeling(&inst, 1, 4).unwrap();
        let mut labels = labeling.to_labels().unwrap();
        assert_eq!(labels, vec![1,0,2,3]);
        labels.sort_unstable();
        assert_eq!(labels, vec![0,1,2,3]);
    }

    #[test]
    fn test_single_node() {
        let inst = TreeInstance::new(vec![vec![]]).unwrap();
        let labeling = greedy_labeling(&inst, 0, 1).unwrap();
        assert_eq!(labeling.to_labels().unwrap(), vec![0]);
        let issues:Vec<ValidityIssue> = validate(&inst, 1, &labeling);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        let inst = path4();
        assert!(matches!(greedy_labeling(&inst, 0, 0), Err(ProximityError::InvalidInput(_))));
        assert!(matches!(greedy_labeling(&inst, 0, 5), Err(ProximityError::InvalidInput(_))));
        assert!(matches!(greedy_labeling(&inst, 4, 2), Err(ProximityError::InvalidInput(_))));
    }

    #[test]
    fn test_step_on_imperfect_partial_labeling() {
        // nodes 0 and 2 both hold label 0: node 1 still receives the smallest free label
        let inst = path4();
        let mut labeling = Labeling::unassigned(4);
        labeling.assign(0, 0).unwrap();
        labeling.assign(2, 0).unwrap();
        label_neighborhood_of(&inst, 1, 3, &mut labeling).unwrap();
        assert_eq!(labeling.get(1), Some(1));
        assert_eq!(labeling.get(3), None);
    }
}
