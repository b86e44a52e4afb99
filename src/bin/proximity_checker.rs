use std::process;

use clap::{App, load_yaml};

use proximity_labeling::batch::{check_solution, read_solutions};
use proximity_labeling::util::{init_logging, parse_usize, read_instances, required};
use proximity_labeling::{ProximityError, Result};


/** checks one stored labeling, returns true if it is valid and optimal */
fn check_instance(i:usize, adj_list:&[Vec<usize>], k:usize, root:usize, labels:&[usize]) -> bool {
    let outcome = check_solution(i, adj_list, k, root, labels);
    if let Err(e) = &outcome.labels {
        println!("ERROR: instance {}: {}", i, e);
    }
    for issue in &outcome.issues {
        println!("ERROR: instance {}: {}", i, issue);
    }
    match &outcome.ratio {
        Some(Ok(r)) => println!("instance {}: max proximity ratio {}", i, r),
        Some(Err(e)) => println!("ERROR: instance {}: {}", i, e),
        None => {},
    }
    outcome.is_accepted()
}

fn run() -> Result<bool> {
    // parse arguments
    let yaml = load_yaml!("proximity_checker.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let instances = read_instances(
        required(&main_args, "instance")?,
        main_args.value_of("type").unwrap_or("json"),
        parse_usize(&main_args, "k")?
    )?;
    let root = parse_usize(&main_args, "root")?.unwrap_or(0);
    let solutions = read_solutions(required(&main_args, "solution")?)?;
    if solutions.len() != instances.len() {
        return Err(ProximityError::InvalidInput(format!(
            "{} instances but {} solutions", instances.len(), solutions.len()
        )));
    }
    // call checker
    let mut all_ok = true;
    for (i,((adj_list,k),labels)) in instances.trees.iter()
    .zip(instances.k_values.iter())
    .zip(solutions.iter()).enumerate() {
        all_ok &= check_instance(i, adj_list, *k, root, labels);
    }
    Ok(all_ok)
}

/** checks solutions of a batch of trees */
pub fn main() {
    init_logging();
    match run() {
        Ok(true) => println!("all solutions valid and optimal"),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
    }
}
