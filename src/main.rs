//! LRU Paging Simulator - Main Entry Point
//!
//! Usage: lru-paging-sim [OPTIONS]
//!
//! Models processes requesting logical pages against a finite pool of
//! physical frames. A process over its working-set limit gives up its own
//! least recently used page; when physical memory is exhausted the
//! globally least recently used page is evicted instead. Each tick spawns
//! processes on a schedule and issues one access per live process.

use std::env;
use std::process;

use anyhow::{Context, Result, anyhow, bail};
use rand::Rng;

use paging_sim::config::SimConfig;
use paging_sim::constants::DEFAULT_TICKS;
use paging_sim::driver::{DriverConfig, TickDriver};
use paging_sim::engine::MemoryManager;
use paging_sim::report;

/// Command-line configuration
struct Config {
    sim: SimConfig,
    schedule: DriverConfig,
    ticks: u64,
    seed: Option<u64>,
    verbose: bool,
}

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_help(program: &str) {
    eprintln!("LRU Paging Simulator - working-set and LRU page replacement");
    eprintln!();
    eprintln!("Usage: {program} [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --ticks <n>           Clock ticks to simulate (default 24)");
    eprintln!("  --frames <n>          Physical frames in the pool (default 64)");
    eprintln!("  --pages <n>           Logical pages per process (default 10)");
    eprintln!("  --working-set <n>     Resident pages a process may keep (default 4)");
    eprintln!("  --table-capacity <n>  Maximum live processes (default 200)");
    eprintln!("  --processes <n>       Processes spawned before the first tick (default 4)");
    eprintln!("  --spawn-every <n>     Spawn one process every n ticks, 0 = never (default 3)");
    eprintln!("  --seed <n>            Seed for the random source (default: random)");
    eprintln!("  -v, --verbose         Print memory, queue, and access detail per tick");
    eprintln!("  -h, --help            Print this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {program} --ticks 50 --seed 7");
    eprintln!("  {program} -v --frames 8 --working-set 2");
}

fn parse_args() -> Result<Config> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "lru-paging-sim".to_string());

    let mut config = Config {
        sim: SimConfig::default(),
        schedule: DriverConfig::default(),
        ticks: DEFAULT_TICKS,
        seed: None,
        verbose: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(&program);
                process::exit(0);
            }
            "-v" | "--verbose" => config.verbose = true,
            "--ticks" => config.ticks = value(&mut args, "--ticks")?,
            "--frames" => config.sim.frame_count = value(&mut args, "--frames")?,
            "--pages" => config.sim.pages_per_process = value(&mut args, "--pages")?,
            "--working-set" => config.sim.working_set_limit = value(&mut args, "--working-set")?,
            "--table-capacity" => config.sim.table_capacity = value(&mut args, "--table-capacity")?,
            "--processes" => config.schedule.initial_processes = value(&mut args, "--processes")?,
            "--spawn-every" => config.schedule.spawn_every = value(&mut args, "--spawn-every")?,
            "--seed" => config.seed = Some(value(&mut args, "--seed")?),
            other if other.starts_with('-') => {
                bail!("Unknown option: {other}\nUse --help for usage information.");
            }
            other => bail!("Unexpected argument: {other}"),
        }
    }

    Ok(config)
}

fn value<T>(args: &mut env::Args, flag: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = args
        .next()
        .ok_or_else(|| anyhow!("{flag} needs a value"))?;
    raw.parse()
        .map_err(|e| anyhow!("invalid value for {flag}: {e}"))
}

fn run(config: &Config) -> Result<()> {
    let manager = MemoryManager::new(config.sim).context("invalid simulation parameters")?;

    // A fixed seed reproduces a run exactly; without one, draw a seed and
    // print it so the run can still be replayed.
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    println!("seed: {seed}");

    let mut driver = TickDriver::new(manager, config.schedule, seed);
    let mut reports = Vec::with_capacity(config.ticks as usize);

    for _ in 0..config.ticks {
        let report = driver.tick();

        if config.verbose {
            println!("{}", report::tick_banner(report.tick));
            print!("{}", report::render_tick(&report));
            print!("{}", report::render_processes(driver.manager()));
            print!("{}", report::render_queue(driver.manager()));
            print!("{}", report::render_frames(driver.manager()));
            println!();
        }

        reports.push(report);
    }

    print!("{}", report::render_summary(&reports, driver.manager()));
    Ok(())
}
