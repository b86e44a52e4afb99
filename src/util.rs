use clap::ArgMatches;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::batch::{write_solutions, BatchConfig, BatchInstances, BatchReport};
use crate::error::{ProximityError, Result};
use crate::tree::{TreeInstance, VertexId};

/** installs the log subscriber of the executables (level taken from RUST_LOG, info by default) */
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// value of a required argument
pub fn required<'a>(main_args:&'a ArgMatches, name:&str) -> Result<&'a str> {
    main_args.value_of(name)
        .ok_or_else(|| ProximityError::InvalidInput(format!("missing argument {}", name)))
}

/// value of an optional integer argument
pub fn parse_usize(main_args:&ArgMatches, name:&str) -> Result<Option<usize>> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<usize>().map(Some).map_err(|_|
            ProximityError::InvalidInput(format!("unable to parse {} ({})", name, s))
        ),
    }
}

/** reads an instance file given its type:
 - "json": batch of trees with their k values
 - "tree": a single tree in the DIMACS-like format, k given separately
*/
pub fn read_instances(inst_filename:&str, instance_type:&str, k:Option<usize>) -> Result<BatchInstances> {
    match instance_type {
        "json" => BatchInstances::from_file(inst_filename),
        "tree" => {
            let k = k.ok_or_else(||
                ProximityError::InvalidInput("k is required for a tree instance".to_string())
            )?;
            let inst = TreeInstance::from_file(inst_filename)?;
            inst.display_statistics();
            Ok(BatchInstances::single(&inst, k))
        },
        _ => Err(ProximityError::InvalidInput(
            format!("instance type unknown {} (valid: 'json', 'tree')", instance_type)
        ))
    }
}

/** reads command line input and returns the instance name, instances, driver options,
solution_filename, stats_filename */
pub fn read_params(main_args:&ArgMatches) -> Result<(String, BatchInstances, BatchConfig, Option<String>, Option<String>)> {
    let inst_filename = required(main_args, "instance")?;
    let instance_type = main_args.value_of("type").unwrap_or("json");
    let k = parse_usize(main_args, "k")?;
    let root:VertexId = parse_usize(main_args, "root")?.unwrap_or(0);
    let check = main_args.is_present("check");
    // read value of the solution filename
    let sol_file: Option<String> = match main_args.value_of("solution") {
        None => None,
        Some(e) => {
            println!("printing solutions in: {}", e);
            Some(e.to_string())
        }
    };
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}\n", e);
            Some(e.to_string())
        }
    };
    let instances = read_instances(inst_filename, instance_type, k)?;
    println!("{} instances read from {}", instances.len(), inst_filename);
    println!("=======================");
    let config = BatchConfig { root, check, show_completion: !main_args.is_present("quiet") };
    Ok((inst_filename.to_string(), instances, config, sol_file, perf_file))
}

/// exports batch results to files
pub fn export_results(
    report:&BatchReport,
    stats:&Value,
    perf_file:Option<String>,
    sol_file:Option<String>,
) -> Result<()> {
    // export statistics
    if let Some(filename) = perf_file {
        std::fs::write(filename.as_str(), serde_json::to_string(stats)?)?;
    }
    // export solutions
    if let Some(filename) = sol_file {
        write_solutions(filename.as_str(), &report.solutions())?;
        println!("solutions saved to {}", filename);
    }
    Ok(())
}
