use std::fs::File;
use std::io::{self, BufWriter};
use std::process;

use clap::{App, load_yaml};

use proximity_labeling::batch::{read_solutions, BatchInstances};
use proximity_labeling::dot::write_dot;
use proximity_labeling::util::{init_logging, parse_usize, required};
use proximity_labeling::{ProximityError, Result, TreeInstance};


fn run() -> Result<()> {
    // parse arguments
    let yaml = load_yaml!("tree_dot.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let instances = BatchInstances::from_file(required(&main_args, "instance")?)?;
    let solutions = read_solutions(required(&main_args, "solution")?)?;
    let index = parse_usize(&main_args, "index")?.unwrap_or(0);
    let (adj_list, labels) = match (instances.trees.get(index), solutions.get(index)) {
        (Some(a), Some(l)) => (a, l),
        _ => return Err(ProximityError::InvalidInput(format!(
            "index {} outside the batch ({} instances, {} solutions)",
            index, instances.len(), solutions.len()
        ))),
    };
    let inst = TreeInstance::new(adj_list.clone())?;
    match main_args.value_of("output") {
        None => write_dot(&inst, labels, &mut io::stdout().lock())?,
        Some(filename) => write_dot(&inst, labels, &mut BufWriter::new(File::create(filename)?))?,
    }
    Ok(())
}

/** renders a labeled tree */
pub fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("ERROR: {}", e);
        process::exit(2);
    }
}
