use std::fmt;

use bit_set::BitSet;
use serde::{Serialize, Deserialize};

use crate::error::{ProximityError, Result};
use crate::tree::{TreeInstance, VertexId};

/** Label (an integer in [0, k-1]) */
pub type Label = usize;

/** partial or complete assignment of labels to the nodes of a tree.

Only grows: a label, once assigned, is never changed nor removed.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labeling {
    /// labels[v]: label of node v (None if not assigned yet)
    labels: Vec<Option<Label>>,
}

impl Labeling {
    /// labeling of n nodes, none of them labeled
    pub fn unassigned(n:usize) -> Self {
        Self { labels: vec![None ; n] }
    }

    /// complete labeling read from a plain label list (e.g. a stored solution)
    pub fn from_labels(labels:&[Label]) -> Self {
        Self { labels: labels.iter().map(|l| Some(*l)).collect() }
    }

    /// number of nodes covered by the labeling
    pub fn len(&self) -> usize { self.labels.len() }

    /// true if the labeling covers no node
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// label of node v (None if unassigned or beyond the labeling)
    pub fn get(&self, v:VertexId) -> Option<Label> {
        self.labels.get(v).copied().flatten()
    }

    /// true if v already holds a label
    pub fn is_assigned(&self, v:VertexId) -> bool { self.get(v).is_some() }

    /** assigns label l to v.
    fails if v already holds a label (a labeling is never rewritten) or is out of range
    */
    pub fn assign(&mut self, v:VertexId, l:Label) -> Result<()> {
        let n = self.labels.len();
        match self.labels.get_mut(v) {
            None => Err(ProximityError::InvalidInput(
                format!("node {} beyond labeling of {} nodes", v, n)
            )),
            Some(Some(prev)) => Err(ProximityError::InvalidInput(
                format!("node {} already labeled {}", v, prev)
            )),
            Some(slot) => { *slot = Some(l); Ok(()) }
        }
    }

    /// true if every node holds a label
    pub fn is_complete(&self) -> bool {
        self.labels.iter().all(|l| l.is_some())
    }

    /// raw view (None for unassigned nodes)
    pub fn as_slice(&self) -> &[Option<Label>] { &self.labels }

    /** plain label list of a complete labeling (the form given to persistence and
    presentation). fails with `UnlabeledNode` on the first unassigned node.
    */
    pub fn to_labels(&self) -> Result<Vec<Label>> {
        self.labels.iter().enumerate()
            .map(|(v,l)| l.ok_or(ProximityError::UnlabeledNode(v)))
            .collect()
    }
}


/** problem found by the validity checker */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidityIssue {
    /// the labeling does not have one entry per node
    LengthMismatch {
        /// nodes in the tree
        nb_nodes: usize,
        /// entries in the labeling
        nb_labels: usize,
    },
    /// node without label
    UnlabeledNode(VertexId),
    /// label of [0, k-1] used by no node
    MissingLabel(Label),
    /// label outside [0, k-1]
    LabelOutOfRange {
        /// offending node
        node: VertexId,
        /// its label
        label: Label,
    },
}

impl fmt::Display for ValidityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidityIssue::LengthMismatch { nb_nodes, nb_labels } =>
                write!(f, "tree has {} nodes, but solution has {} labels", nb_nodes, nb_labels),
            ValidityIssue::UnlabeledNode(v) => write!(f, "node {} not labeled", v),
            ValidityIssue::MissingLabel(l) => write!(f, "label {} not in solution", l),
            ValidityIssue::LabelOutOfRange { node, label } =>
                write!(f, "node {} has invalid label {}", node, label),
        }
    }
}

/**
checks the structural validity of a labeling. Never fails: every violated check
is reported (an empty list means valid).
 - the labeling has one entry per node
 - every node is labeled
 - every label in [0, k-1] is used at least once
 - every label lies in [0, k-1]
*/
pub fn validate(inst:&TreeInstance, k:usize, labeling:&Labeling) -> Vec<ValidityIssue> {
    let mut res = Vec::new();
    if labeling.len() != inst.nb_vertices() {
        res.push(ValidityIssue::LengthMismatch {
            nb_nodes: inst.nb_vertices(),
            nb_labels: labeling.len()
        });
    }
    let mut seen = BitSet::with_capacity(k);
    for (v,l) in labeling.as_slice().iter().enumerate() {
        match l {
            None => res.push(ValidityIssue::UnlabeledNode(v)),
            Some(l) if *l >= k => res.push(ValidityIssue::LabelOutOfRange { node:v, label:*l }),
            Some(l) => { seen.insert(*l); }
        }
    }
    for l in (0..k).filter(|l| !seen.contains(*l)) {
        res.push(ValidityIssue::MissingLabel(l));
    }
    res
}


#[cfg(test)]
mod tests {
    use super::*;

    fn path4() -> TreeInstance {
        TreeInstance::new(vec![vec![1],vec![0,2],vec![1,3],vec![2]]).unwrap()
    }

    #[test]
    fn test_assign_is_monotone() {
        let mut labeling = Labeling::unassigned(3);
        labeling.assign(1, 2).unwrap();
        assert_eq!(labeling.get(1), Some(2));
        assert!(labeling.assign(1, 0).is_err());
        assert!(labeling.assign(7, 0).is_err());
        assert_eq!(labeling.as_slice(), &[None, Some(2), None]);
        assert!(!labeling.is_complete());
    }

    #[test]
    fn test_to_labels() {
        let labeling = Labeling::from_labels(&[0,1,0]);
        assert_eq!(labeling.to_labels().unwrap(), vec![0,1,0]);
        let partial = Labeling::unassigned(2);
        assert!(matches!(partial.to_labels(), Err(ProximityError::UnlabeledNode(0))));
    }

    #[test]
    fn test_valid() {
        let labeling = Labeling::from_labels(&[0,1,0,1]);
        assert!(validate(&path4(), 2, &labeling).is_empty());
    }

    #[test]
    fn test_one_node_unassigned() {
        let mut labeling = Labeling::unassigned(4);
        for (v,l) in [(0,0),(1,1),(2,0)].iter() { labeling.assign(*v, *l).unwrap(); }
        let issues = validate(&path4(), 2, &labeling);
        assert_eq!(issues, vec![ValidityIssue::UnlabeledNode(3)]);
    }

    #[test]
    fn test_reports_every_issue() {
        let labeling = Labeling::from_labels(&[0,5,0]);
        let issues = validate(&path4(), 3, &labeling);
        assert_eq!(issues, vec![
            ValidityIssue::LengthMismatch { nb_nodes:4, nb_labels:3 },
            ValidityIssue::LabelOutOfRange { node:1, label:5 },
            ValidityIssue::MissingLabel(1),
            ValidityIssue::MissingLabel(2),
        ]);
    }
}
