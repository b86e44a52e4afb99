/*
Implements:
 - reading and writing batches of instances (trees with their k) and of solutions
 - the batch driver: labels every instance, optionally audits and validates it,
   and isolates the failure of an instance from the rest of the batch
*/
use std::fs;
use std::time::Instant;

use serde::{Serialize, Deserialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::{ProximityError, Result};
use crate::labeling::{validate, Label, Labeling, ValidityIssue};
use crate::proximity::audit;
use crate::search::greedy_labeling::greedy_labeling;
use crate::tree::{TreeInstance, VertexId};

/** data structure to represent a batch of instances.
trees[i] is the adjacency list of the ith tree, k_values[i] its number of labels.
*/
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchInstances {
    /// adjacency lists of the trees
    pub trees: Vec<Vec<Vec<VertexId>>>,
    /// number of labels of each tree
    pub k_values: Vec<usize>,
}

impl BatchInstances {
    /** reads a batch from a JSON file. */
    pub fn from_file(filename:&str) -> Result<Self> {
        let content = fs::read_to_string(filename)?;
        let res:Self = serde_json::from_str(&content)?;
        res.check_lengths()?;
        Ok(res)
    }

    /** writes the batch into a JSON file. */
    pub fn to_file(&self, filename:&str) -> Result<()> {
        fs::write(filename, serde_json::to_string(self)?)?;
        Ok(())
    }

    /// batch made of a single instance
    pub fn single(inst:&TreeInstance, k:usize) -> Self {
        Self { trees: vec![inst.adj_lists().to_vec()], k_values: vec![k] }
    }

    /// number of instances
    pub fn len(&self) -> usize { self.trees.len() }

    /// true if the batch holds no instance
    pub fn is_empty(&self) -> bool { self.trees.is_empty() }

    /// trees and k values must be parallel sequences
    fn check_lengths(&self) -> Result<()> {
        if self.trees.len() != self.k_values.len() {
            return Err(ProximityError::InvalidInput(format!(
                "{} trees but {} k values", self.trees.len(), self.k_values.len()
            )));
        }
        Ok(())
    }
}

/** reads solutions (one label list per instance) from a JSON file */
pub fn read_solutions(filename:&str) -> Result<Vec<Vec<Label>>> {
    let content = fs::read_to_string(filename)?;
    Ok(serde_json::from_str(&content)?)
}

/** writes solutions (one label list per instance) into a JSON file */
pub fn write_solutions(filename:&str, solutions:&[Vec<Label>]) -> Result<()> {
    fs::write(filename, serde_json::to_string(solutions)?)?;
    Ok(())
}


/** options of the batch driver */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// node from which every instance is traversed
    pub root: VertexId,
    /// if true, audit and validate each labeling
    pub check: bool,
    /// if true, log the start of every instance
    pub show_completion: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { root:0, check:false, show_completion:true }
    }
}

/** what happened to one instance of the batch */
#[derive(Debug)]
pub struct InstanceOutcome {
    /// position in the batch
    pub index: usize,
    /// labels computed (or the reason why the instance failed)
    pub labels: Result<Vec<Label>>,
    /// proximity ratio (only if checked and labeled)
    pub ratio: Option<Result<f64>>,
    /// validity issues (only if checked and labeled)
    pub issues: Vec<ValidityIssue>,
}

impl InstanceOutcome {
    /// true if the labeling failed
    pub fn is_failed(&self) -> bool { self.labels.is_err() }

    /// true if the instance is labeled, valid and checked optimal
    pub fn is_accepted(&self) -> bool {
        !self.is_failed() && self.issues.is_empty() && matches!(self.ratio, Some(Ok(r)) if r <= 1.)
    }

    /// true if the instance was checked and did not reach ratio 1 (or the audit failed)
    pub fn is_non_optimal(&self) -> bool {
        match &self.ratio {
            Some(Ok(r)) => *r > 1.,
            Some(Err(_)) => true,
            None => false,
        }
    }
}

/** result of a batch run */
#[derive(Debug)]
pub struct BatchReport {
    /// one outcome per instance, in batch order
    pub outcomes: Vec<InstanceOutcome>,
    /// time spent (in seconds)
    pub time_searched: f32,
}

impl BatchReport {
    /** solutions in batch order. A failed instance gets an empty label list so that
    positions stay aligned with the instances. */
    pub fn solutions(&self) -> Vec<Vec<Label>> {
        self.outcomes.iter()
            .map(|o| o.labels.as_ref().map(|l| l.clone()).unwrap_or_default())
            .collect()
    }

    /// number of instances whose labeling failed
    pub fn nb_failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// number of checked instances that are not optimal
    pub fn nb_non_optimal(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_non_optimal()).count()
    }

    /// number of instances with at least one validity issue
    pub fn nb_invalid(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.issues.is_empty()).count()
    }

    /// statistics of the run (exported as JSON by the executables)
    pub fn stats(&self, inst_name:&str) -> Value {
        let max_ratio = self.outcomes.iter()
            .filter_map(|o| match &o.ratio { Some(Ok(r)) => Some(*r), _ => None })
            .fold(None, |acc:Option<f64>, r| Some(acc.map_or(r, |a| a.max(r))));
        json!({
            "inst_name": inst_name,
            "nb_instances": self.outcomes.len(),
            "nb_failed": self.nb_failed(),
            "nb_non_optimal": self.nb_non_optimal(),
            "nb_invalid": self.nb_invalid(),
            "max_ratio": max_ratio,
            "time_searched": self.time_searched,
        })
    }
}

/** labels (and possibly checks) one instance. Never fails: errors are kept in the outcome. */
pub fn run_instance(index:usize, adj_list:&[Vec<VertexId>], k:usize, config:&BatchConfig) -> InstanceOutcome {
    if config.show_completion { info!(index, k, "started instance"); }
    let inst = match TreeInstance::new(adj_list.to_vec()) {
        Ok(inst) => inst,
        Err(e) => {
            warn!(index, error=%e, "invalid instance");
            return InstanceOutcome { index, labels:Err(e), ratio:None, issues:vec![] };
        }
    };
    let labeling = match greedy_labeling(&inst, config.root, k) {
        Ok(labeling) => labeling,
        Err(e) => {
            warn!(index, error=%e, "labeling failed");
            return InstanceOutcome { index, labels:Err(e), ratio:None, issues:vec![] };
        }
    };
    let (ratio, issues) = if config.check {
        (Some(check_ratio(index, &inst, config.root, k, &labeling)), check_validity(index, &inst, k, &labeling))
    } else {
        (None, vec![])
    };
    InstanceOutcome { index, labels:labeling.to_labels(), ratio, issues }
}

/// audits a labeling, k = 1 being optimal by definition
fn check_ratio(index:usize, inst:&TreeInstance, root:VertexId, k:usize, labeling:&Labeling) -> Result<f64> {
    if k == 1 { return Ok(1.); }
    let res = audit(inst, root, k, labeling);
    match &res {
        Ok(r) if *r > 1. => warn!(index, ratio=*r, "proximity ratio error: a ratio {} detected", r),
        Ok(_) => {},
        Err(e) => warn!(index, error=%e, "proximity audit failed"),
    }
    res
}

/// validates a labeling, logging every issue
fn check_validity(index:usize, inst:&TreeInstance, k:usize, labeling:&Labeling) -> Vec<ValidityIssue> {
    let issues = validate(inst, k, labeling);
    for issue in &issues {
        warn!(index, "validity error: {}", issue);
    }
    issues
}

/** checks a stored labeling of one instance: validity first, then (if valid) the
proximity audit. Never fails: errors are kept in the outcome, whose labels are the
stored ones (or the reason why the tree is rejected).
*/
pub fn check_solution(index:usize, adj_list:&[Vec<VertexId>], k:usize, root:VertexId, labels:&[Label]) -> InstanceOutcome {
    let inst = match TreeInstance::new(adj_list.to_vec()) {
        Ok(inst) => inst,
        Err(e) => {
            warn!(index, error=%e, "invalid instance");
            return InstanceOutcome { index, labels:Err(e), ratio:None, issues:vec![] };
        }
    };
    let labeling = Labeling::from_labels(labels);
    let issues = check_validity(index, &inst, k, &labeling);
    let ratio = if issues.is_empty() {
        Some(check_ratio(index, &inst, root, k, &labeling))
    } else {
        None
    };
    InstanceOutcome { index, labels:Ok(labels.to_vec()), ratio, issues }
}

/** runs the labeling on every instance of the batch (see `run_instance`).
fails only if trees and k_values have different lengths.
*/
pub fn run_batch(trees:&[Vec<Vec<VertexId>>], k_values:&[usize], config:&BatchConfig) -> Result<BatchReport> {
    if trees.len() != k_values.len() {
        return Err(ProximityError::InvalidInput(format!(
            "{} trees but {} k values", trees.len(), k_values.len()
        )));
    }
    let t_start = Instant::now();
    let outcomes:Vec<InstanceOutcome> = trees.iter().zip(k_values.iter()).enumerate()
        .map(|(i,(adj_list,k))| run_instance(i, adj_list, *k, config))
        .collect();
    let report = BatchReport { outcomes, time_searched: t_start.elapsed().as_secs_f32() };
    info!(
        nb_instances=report.outcomes.len(),
        nb_failed=report.nb_failed(),
        nb_non_optimal=report.nb_non_optimal(),
        "completed batch"
    );
    Ok(report)
}
