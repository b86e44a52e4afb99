use std::collections::VecDeque;

use bit_set::BitSet;
use ordered_float::OrderedFloat;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::error::{ProximityError, Result};
use crate::labeling::Labeling;
use crate::search::neighborhood::{count_neighborhood, label_neighborhood};
use crate::search::traversal::bfs_order;
use crate::tree::{TreeInstance, VertexId};

/** radius of subset seen from source: maximum hop distance from source to a member
of subset, walking only along edges with both endpoints in subset.

breadth-first shortest paths restricted to subset (unit weights).

fails with `InvalidInput` if source is not in subset or some member is not a node of
the tree, and with `DisconnectedSubset` if some member cannot be reached inside the subset.
*/
pub fn eccentricity(inst:&TreeInstance, source:VertexId, subset:&[VertexId]) -> Result<usize> {
    if let Some(u) = subset.iter().find(|u| **u >= inst.nb_vertices()) {
        return Err(ProximityError::InvalidInput(
            format!("subset member {} outside [0, {})", u, inst.nb_vertices())
        ));
    }
    let members:BitSet = subset.iter().copied().collect();
    if !members.contains(source) {
        return Err(ProximityError::InvalidInput(
            format!("source {} not in the subset", source)
        ));
    }
    let mut dist:Vec<Option<usize>> = vec![None ; inst.nb_vertices()];
    let mut queue = VecDeque::from(vec![source]);
    dist[source] = Some(0);
    let mut res = 0;
    while let Some(u) = queue.pop_front() {
        let du = dist[u].unwrap_or(0);
        res = res.max(du);
        for v in inst.neighbors(u) {
            if members.contains(*v) && dist[*v].is_none() {
                dist[*v] = Some(du+1);
                queue.push_back(*v);
            }
        }
    }
    match subset.iter().find(|u| dist[**u].is_none()) {
        Some(u) => Err(ProximityError::DisconnectedSubset { source_node:source, node:*u }),
        None => Ok(res),
    }
}

/** proximity ratio of node v: radius of its label-diverse neighborhood divided by the
radius of its k-nearest-node neighborhood. Fails with `DivideByZero` if the latter is 0.
*/
pub fn node_ratio(inst:&TreeInstance, v:VertexId, k:usize, labeling:&Labeling) -> Result<f64> {
    let label_nbhd = label_neighborhood(inst, v, k, labeling)?;
    let (count_nbhd, _) = count_neighborhood(inst, v, k, labeling);
    let r = eccentricity(inst, v, &label_nbhd)?;
    let m = eccentricity(inst, v, &count_nbhd)?;
    if m == 0 {
        return Err(ProximityError::DivideByZero(v));
    }
    Ok(r as f64 / m as f64)
}

/** result of a proximity audit */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityReport {
    /// maximum proximity ratio over all nodes (1 for an optimal labeling)
    pub max_ratio: f64,
    /// first node (in traversal order) reaching the maximum ratio
    pub worst_node: VertexId,
}

impl ProximityReport {
    /// true if every node reaches the optimal ratio
    pub fn is_optimal(&self) -> bool { self.max_ratio <= 1. }
}

/** audits a complete labeling: computes the proximity ratio of every node (in
breadth-first order from root) and returns the worst one with the node reaching it.

k = 1 always fails with `DivideByZero` (every k-nearest-node neighborhood has radius 0):
callers treat it as ratio 1 without auditing.
*/
pub fn audit_report(
    inst:&TreeInstance,
    root:VertexId,
    k:usize,
    labeling:&Labeling
) -> Result<ProximityReport> {
    if root >= inst.nb_vertices() {
        return Err(ProximityError::InvalidInput(format!("root {} out of range", root)));
    }
    let mut best:Option<(OrderedFloat<f64>, VertexId)> = None;
    for v in bfs_order(inst, root) {
        let ratio = OrderedFloat(node_ratio(inst, v, k, labeling)?);
        if best.map_or(true, |(r,_)| ratio > r) {
            best = Some((ratio, v));
        }
    }
    // bfs_order always yields the root
    let (max_ratio, worst_node) = best.unwrap_or((OrderedFloat(0.), root));
    debug!(max_ratio=max_ratio.into_inner(), worst_node, "audit completed");
    Ok(ProximityReport { max_ratio: max_ratio.into_inner(), worst_node })
}

/** maximum proximity ratio of a labeling over all nodes (see `audit_report`) */
pub fn audit(inst:&TreeInstance, root:VertexId, k:usize, labeling:&Labeling) -> Result<f64> {
    audit_report(inst, root, k, labeling).map(|report| report.max_ratio)
}
