use clap::{Arg, ArgAction, ArgMatches, Command};

pub const SCENARIO_ARG_NAME: &str = "scenario";
pub const OUT_RESULT_ARG_NAME: &str = "out-result";
pub const MODEL_ARG_NAME: &str = "model";
pub const SEED_ARG_NAME: &str = "seed";
pub const ITERATIONS_ARG_NAME: &str = "iterations";
pub const MEMORY_ARG_NAME: &str = "memory";
pub const HUBS_ARG_NAME: &str = "hubs";
pub const LEGACY_SLA_ARG_NAME: &str = "legacy-sla";
pub const PRETTY_ARG_NAME: &str = "pretty";

pub fn get_arg_matches() -> ArgMatches {
    Command::new("skylift-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plans air-cargo shipment itineraries over a scheduled flight network")
        .arg(
            Arg::new(SCENARIO_ARG_NAME)
                .help("Path to a json scenario with airports, flights, orders and a planning window")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Writes the plan report to the file instead of stdout")
                .short('o')
                .long(OUT_RESULT_ARG_NAME),
        )
        .arg(
            Arg::new(MODEL_ARG_NAME)
                .help("Warehouse capacity model")
                .long(MODEL_ARG_NAME)
                .value_parser(["flat", "forecast"])
                .default_value("forecast"),
        )
        .arg(Arg::new(SEED_ARG_NAME).help("Fixed random seed for reproducible runs").long(SEED_ARG_NAME))
        .arg(Arg::new(ITERATIONS_ARG_NAME).help("Amount of planning iterations").long(ITERATIONS_ARG_NAME))
        .arg(
            Arg::new(MEMORY_ARG_NAME)
                .help("Path to the route memory file, read before and written after the run")
                .long(MEMORY_ARG_NAME),
        )
        .arg(
            Arg::new(HUBS_ARG_NAME)
                .help("Comma separated hub airport codes, overriding the default hub set")
                .long(HUBS_ARG_NAME),
        )
        .arg(
            Arg::new(LEGACY_SLA_ARG_NAME)
                .help("Uses the first generation delivery promise: 1 day within a continent, 2 across")
                .long(LEGACY_SLA_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(PRETTY_ARG_NAME)
                .help("Pretty prints the plan report")
                .long(PRETTY_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .get_matches()
}
