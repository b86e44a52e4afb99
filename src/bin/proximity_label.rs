use std::process;

use clap::{App, load_yaml};

use proximity_labeling::batch::run_batch;
use proximity_labeling::util::{init_logging, read_params, export_results};
use proximity_labeling::Result;


fn run() -> Result<bool> {
    // parse arguments
    let yaml = load_yaml!("proximity_label.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let (
        inst_filename,
        instances,
        config,
        sol_file,
        perf_file
    ) = read_params(&main_args)?;

    // solve them
    let report = run_batch(&instances.trees, &instances.k_values, &config)?;
    println!(
        "labeled {} instances in {:.3} seconds ({} failed)",
        report.outcomes.len(), report.time_searched, report.nb_failed()
    );
    if config.check {
        println!("{} non optimal, {} invalid", report.nb_non_optimal(), report.nb_invalid());
    }
    let stats = report.stats(inst_filename.as_str());

    // export results
    export_results(&report, &stats, perf_file, sol_file)?;
    Ok(report.nb_failed() == 0 && report.nb_non_optimal() == 0 && report.nb_invalid() == 0)
}

/** labels a batch of trees using the greedy proximity labeling */
pub fn main() {
    init_logging();
    match run() {
        Ok(true) => {},
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
    }
}
