//! A command line interface to the skylift air-cargo itinerary planner.
//!
//! ## Usage
//!
//! Plan a scenario with the default forecast capacity model:
//!
//!     skylift-cli scenario.json
//!
//! Reproducible run with the first generation flat model, carrying the route
//! memory across invocations:
//!
//!     skylift-cli scenario.json --model flat --seed 42 --memory memory.json
//!
//! For more details, simply run
//!
//!     skylift-cli --help

mod args;

use self::args::*;

mod scenario;

use self::scenario::*;

use skylift_core::prelude::*;
use std::fs::File;
use std::io::{stdout, BufReader, BufWriter, Write};
use std::process;

fn main() {
    let matches = get_arg_matches();

    // required
    let scenario_path = matches.get_one::<String>(SCENARIO_ARG_NAME).unwrap();
    let scenario_file = File::open(scenario_path).unwrap_or_else(|err| {
        eprintln!("Cannot open scenario file '{scenario_path}': '{err}'");
        process::exit(1);
    });

    // optional
    let seed = matches.get_one::<String>(SEED_ARG_NAME).map(|arg| {
        arg.parse::<u64>().unwrap_or_else(|err| {
            eprintln!("Cannot get seed: '{err}'");
            process::exit(1);
        })
    });
    let iterations = matches.get_one::<String>(ITERATIONS_ARG_NAME).map(|arg| {
        arg.parse::<usize>().unwrap_or_else(|err| {
            eprintln!("Cannot get iterations: '{err}'");
            process::exit(1);
        })
    });
    let capacity = match matches.get_one::<String>(MODEL_ARG_NAME).map(String::as_str) {
        Some("flat") => CapacityKind::Flat,
        _ => CapacityKind::Forecast,
    };
    let hubs = matches
        .get_one::<String>(HUBS_ARG_NAME)
        .map(|arg| arg.split(',').map(|code| code.trim().to_uppercase()).collect::<Vec<_>>());
    let memory_path = matches.get_one::<String>(MEMORY_ARG_NAME).cloned();
    let out_path = matches.get_one::<String>(OUT_RESULT_ARG_NAME).cloned();
    let is_legacy_sla = matches.get_flag(LEGACY_SLA_ARG_NAME);
    let is_pretty = matches.get_flag(PRETTY_ARG_NAME);

    let (airports, templates, orders, window) =
        read_scenario(BufReader::new(scenario_file)).unwrap_or_else(|err| {
            eprintln!("Cannot read scenario from '{scenario_path}': '{err}'");
            process::exit(1);
        });

    let mut config = PlannerConfig { capacity, seed, ..PlannerConfig::default() };
    if let Some(iterations) = iterations {
        config.aco.iterations = iterations;
    }
    if let Some(hubs) = hubs {
        config.hubs = hubs;
    }
    if is_legacy_sla {
        config.sla = SlaPolicy::legacy();
    }

    let mut memory = match memory_path.as_deref() {
        Some(path) => load_memory(path).unwrap_or_else(|err| {
            eprintln!("Cannot load route memory: '{err}'");
            process::exit(1);
        }),
        None => RouteMemory::default(),
    };

    let result = Planner::new(config)
        .plan(airports, templates, &orders, window, &mut memory)
        .unwrap_or_else(|err| {
            eprintln!("Cannot plan scenario: '{err}'");
            process::exit(1);
        });

    if let Some(path) = memory_path.as_deref() {
        if let Err(err) = save_memory(path, &memory) {
            eprintln!("Cannot save route memory: '{err}'");
            process::exit(1);
        }
    }

    let out_buffer: BufWriter<Box<dyn Write>> = match out_path.as_deref() {
        Some(path) => BufWriter::new(Box::new(File::create(path).unwrap_or_else(|err| {
            eprintln!("Cannot create result file '{path}': '{err}'");
            process::exit(1);
        }))),
        None => BufWriter::new(Box::new(stdout())),
    };

    let written = if is_pretty {
        serde_json::to_writer_pretty(out_buffer, &result)
    } else {
        serde_json::to_writer(out_buffer, &result)
    };

    if let Err(err) = written {
        eprintln!("Cannot write the plan report: '{err}'");
        process::exit(1);
    }
}
