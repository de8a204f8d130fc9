extern crate clap;
extern crate distrosim;

use clap::{App, Arg};
use distrosim::event_schedule::EventSchedule;
use distrosim::logging::init_logging;
use distrosim::params::SimulationParams;
use distrosim::random;
use distrosim::schema;
use distrosim::simulation::Simulation;

use std::fs::File;
use std::io::{Read, Write};
use std::process;

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    process::exit(1)
}

fn parse_arg<T: std::str::FromStr>(matches: &clap::ArgMatches, name: &str) -> Option<T> {
    matches.value_of(name).map(|value| match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => fail(format!("--{} expects a number, got \"{}\"", name, value)),
    })
}

fn load_network(path: &str) -> distrosim::network::Network {
    let mut json = String::new();
    let read = File::open(path).and_then(|mut file| file.read_to_string(&mut json));
    if let Err(error) = read {
        fail(format!("failed to read {}: {}", path, error));
    }
    match schema::from_json(&json).and_then(|record| schema::restore(&record)) {
        Ok(network) => network,
        Err(error) => fail(format!("failed to load {}: {}", path, error)),
    }
}

fn save_network(path: &str, network: &distrosim::network::Network) {
    let json = schema::to_json(&schema::snapshot(network));
    let written = File::create(path).and_then(|mut file| file.write_all(json.as_bytes()));
    match written {
        Ok(()) => println!("snapshot written to {}", path),
        Err(error) => fail(format!("failed to write {}: {}", path, error)),
    }
}

fn main() {
    init_logging();

    let matches = App::new("distrosim")
        .about("Simulates a peer-to-peer network of computers that balance synthetic \
               workload by exchanging processes with their neighbours.")
        .arg(Arg::with_name("steps")
                 .short("s")
                 .long("steps")
                 .value_name("N")
                 .help("Number of ticks to run.")
                 .takes_value(true))
        .arg(Arg::with_name("computers")
                 .short("c")
                 .long("computers")
                 .value_name("N")
                 .help("Number of computers seeded into the starting network.")
                 .takes_value(true))
        .arg(Arg::with_name("seed")
                 .long("seed")
                 .value_name("N")
                 .help("Seed for the random source; the same seed replays the same run.")
                 .takes_value(true))
        .arg(Arg::with_name("load")
                 .short("i")
                 .long("load")
                 .value_name("FILE")
                 .help("Start from a saved network snapshot instead of a random one.")
                 .takes_value(true))
        .arg(Arg::with_name("save")
                 .short("o")
                 .long("save")
                 .value_name("FILE")
                 .help("Write a JSON snapshot of the final network.")
                 .takes_value(true))
        .get_matches();

    if let Some(seed) = parse_arg::<u64>(&matches, "seed") {
        // The generator rejects an all-zero state, so pad with constants.
        random::seed([(seed >> 32) as u32, seed as u32, 0x9e3779b9, 1]);
    }

    let mut params = SimulationParams::default();
    if let Some(steps) = parse_arg(&matches, "steps") {
        params.steps = steps;
    }
    if let Some(computers) = parse_arg(&matches, "computers") {
        params.num_computers = computers;
    }

    let mut simulation = match matches.value_of("load") {
        Some(path) => Simulation::with_network(load_network(path), params, EventSchedule::empty()),
        None => Simulation::new(params),
    };

    let outcome = simulation.run();

    if let Some(path) = matches.value_of("save") {
        save_network(path, simulation.network());
    }

    if outcome.is_err() {
        process::exit(1);
    }
}
