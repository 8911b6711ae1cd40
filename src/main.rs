use std::fs;
use std::path::PathBuf;

use clap::Parser;
use toml::Table;

use cachesim::sim::config::{CacheConfig, Config, SimConfig};
use cachesim::sim::top::Sim;
use cachesim::sim::trace::TraceReader;

// Exit codes: 1 for bad configuration, 2 for an unreadable trace.
const EXIT_CONFIG: i32 = 1;
const EXIT_TRACE: i32 = 2;

#[derive(Parser)]
#[command(version, about)]
struct CachesimArgs {
    #[arg(long, help = "Path to config.toml")]
    config: Option<PathBuf>,
    #[arg(short = 's', help = "Number of set index bits")]
    set_bits: Option<u32>,
    #[arg(short = 'E', help = "Number of lines per set")]
    lines_per_set: Option<usize>,
    #[arg(short = 'b', help = "Number of block offset bits")]
    block_bits: Option<u32>,
    #[arg(short = 't', long, help = "Path to the memory trace file")]
    trace: Option<PathBuf>,
    #[arg(short, long, help = "Print per-access hit/miss/eviction detail")]
    verbose: bool,
}

pub fn main() {
    env_logger::init();

    let argv = CachesimArgs::parse();
    let config_table: Table = match &argv.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|err| {
                eprintln!("failed to read config file: {}", err);
                std::process::exit(EXIT_CONFIG);
            });
            toml::from_str(&text).unwrap_or_else(|err| {
                eprintln!("cannot parse config toml: {}", err);
                std::process::exit(EXIT_CONFIG);
            })
        }
        None => Table::new(),
    };
    let mut cache_config = CacheConfig::from_section(config_table.get("cache"));
    let mut sim_config = SimConfig::from_section(config_table.get("sim"));

    // override toml configs with argv
    cache_config.set_bits = argv.set_bits.or(cache_config.set_bits);
    cache_config.lines_per_set = argv.lines_per_set.or(cache_config.lines_per_set);
    cache_config.block_bits = argv.block_bits.or(cache_config.block_bits);
    sim_config.trace = argv.trace.or(sim_config.trace);
    sim_config.verbose = argv.verbose || sim_config.verbose;

    let geometry = cache_config.resolve().unwrap_or_else(|err| {
        eprintln!("invalid cache geometry: {}", err);
        std::process::exit(EXIT_CONFIG);
    });
    let Some(trace_path) = sim_config.trace else {
        eprintln!("no trace file given (-t <file>)");
        std::process::exit(EXIT_CONFIG);
    };
    let reader = TraceReader::open(&trace_path).unwrap_or_else(|err| {
        eprintln!("{:#}", err);
        std::process::exit(EXIT_TRACE);
    });

    let mut sim = Sim::new(geometry, sim_config.verbose);
    sim.run(reader);
    println!("{}", sim.stats().summary());
}
