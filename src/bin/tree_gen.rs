use std::process;

use clap::{App, load_yaml};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use tracing::info;

use proximity_labeling::batch::BatchInstances;
use proximity_labeling::dimacs::write_to_file;
use proximity_labeling::gens::{random_adj_lists, random_tree};
use proximity_labeling::util::{init_logging, parse_usize, required};
use proximity_labeling::{ProximityError, Result};


/// writes count random trees in the tree format, one file each
fn write_tree_files(output:&str, n:usize, count:usize, rng:&mut StdRng) -> Result<()> {
    for i in 0..count {
        let inst = random_tree(n, rng)?;
        let filename = if count == 1 { output.to_string() } else { format!("{}.{}", output, i) };
        write_to_file(&inst, filename.as_str())?;
        println!("tree written in {}", filename);
    }
    Ok(())
}


fn run() -> Result<()> {
    // parse arguments
    let yaml = load_yaml!("tree_gen.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let output = required(&main_args, "output")?;
    let output_type = main_args.value_of("type").unwrap_or("json");
    let n = parse_usize(&main_args, "nodes")?.unwrap_or(0);
    if n == 0 {
        return Err(ProximityError::InvalidInput("trees need at least one node".to_string()));
    }
    let k = parse_usize(&main_args, "k")?;
    if let Some(k) = k {
        if k == 0 || k > n {
            return Err(ProximityError::InvalidInput(format!("k={} outside [1, {}]", k, n)));
        }
    }
    let count = parse_usize(&main_args, "count")?.unwrap_or(100);
    let seed = parse_usize(&main_args, "seed")?.unwrap_or(0);
    // generate
    let mut rng = StdRng::seed_from_u64(seed as u64);
    match output_type {
        "json" => {},
        "tree" => {
            if k.is_some() { println!("k ignored: tree files do not store it"); }
            write_tree_files(output, n, count, &mut rng)?;
            info!(count, n, seed, "trees generated");
            return Ok(());
        },
        _ => return Err(ProximityError::InvalidInput(
            format!("output type unknown {} (valid: 'json', 'tree')", output_type)
        )),
    }
    let mut batch = BatchInstances::default();
    for _ in 0..count {
        batch.trees.push(random_adj_lists(n, &mut rng));
        batch.k_values.push(k.unwrap_or_else(|| rng.gen_range(n.min(2)..=n)));
    }
    batch.to_file(output)?;
    info!(count, n, seed, "batch generated");
    println!("{} trees written in {}", batch.len(), output);
    Ok(())
}

/** generates random tree instances */
pub fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("ERROR: {}", e);
        process::exit(2);
    }
}
