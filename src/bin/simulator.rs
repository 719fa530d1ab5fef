//! Magic Survivors Headless Balance Simulator
//!
//! Plays whole runs through the same `game_tick()` the game uses, resolving
//! level-up and evolution choices automatically, and prints an aggregate
//! balance report. Never touches saved progression.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N          Number of runs with incrementing seeds (default: 10)
//!   --seed N          RNG seed (default: 42)
//!   --character C     fire, frost or holy (default: rotate)
//!   --duration SECS   Compress the run schedule into SECS seconds
//!   --json            Print the report as JSON
//!   --verbose         Log gameplay events
//!   --quiet           Only final summary line

use magic_survivors::data::characters::CharacterClass;
use magic_survivors::run::RunSchedule;
use magic_survivors::simulator::{run_simulation, SimConfig, SimReport};
use magic_survivors::utils::build_info::version_line;
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

struct CliOptions {
    runs: u32,
    seed: u64,
    character: Option<CharacterClass>,
    duration: Option<f64>,
    json: bool,
    verbose: bool,
    quiet: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            runs: 10,
            seed: 42,
            character: None,
            duration: None,
            json: false,
            verbose: false,
            quiet: false,
        }
    }
}

fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut options = CliOptions::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                options.runs = parse_value(&args, i, "--runs");
            }
            "--seed" => {
                i += 1;
                options.seed = parse_value(&args, i, "--seed");
            }
            "--duration" => {
                i += 1;
                options.duration = Some(parse_value(&args, i, "--duration"));
            }
            "--character" => {
                i += 1;
                let name = args.get(i).map(String::as_str).unwrap_or("");
                match CharacterClass::from_name(name) {
                    Some(class) => options.character = Some(class),
                    None => fail(&format!("Unknown character: {name}")),
                }
            }
            "--json" => options.json = true,
            "--verbose" => options.verbose = true,
            "--quiet" => options.quiet = true,
            "--version" | "-V" => {
                println!("{}", version_line("simulator"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => fail(&format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    options
}

fn parse_value<T: std::str::FromStr>(args: &[String], index: usize, flag: &str) -> T {
    match args.get(index).and_then(|v| v.parse().ok()) {
        Some(value) => value,
        None => fail(&format!("{flag} requires a number")),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    print_usage();
    std::process::exit(1);
}

fn print_usage() {
    eprintln!(
        "Magic Survivors Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N          Number of runs with incrementing seeds (default: 10)\n\
         \x20 --seed N          RNG seed (default: 42)\n\
         \x20 --character C     fire, frost or holy (default: rotate)\n\
         \x20 --duration SECS   Compress the run schedule into SECS seconds\n\
         \x20 --json            Print the report as JSON\n\
         \x20 --verbose         Log gameplay events\n\
         \x20 --quiet           Only final summary line\n\
         \x20 --version, -V     Show version\n\
         \x20 --help, -h        Show this help"
    );
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary_line(report: &SimReport) {
    println!(
        "runs={} victories={} ({:.1}%) avg_level={:.1} avg_kills={:.0} avg_gold={:.0}",
        report.num_runs,
        report.victories,
        report.victory_rate() * 100.0,
        report.avg_final_level,
        report.avg_kills,
        report.avg_gold,
    );
}

fn main() {
    let options = parse_args();
    init_tracing(options.verbose);

    let schedule = match options.duration {
        Some(secs) if secs > 0.0 => RunSchedule::scaled(secs),
        Some(_) => fail("--duration must be positive"),
        None => RunSchedule::default(),
    };
    let config = SimConfig {
        num_runs: options.runs,
        seed: Some(options.seed),
        character: options.character,
        schedule,
        verbosity: if options.quiet { 0 } else { 2 },
        ..SimConfig::default()
    };

    if !options.quiet {
        eprintln!(
            "Magic Survivors Simulator: {} run(s) of {:.0}s, seed={}, character={}",
            config.num_runs,
            config.schedule.duration,
            options.seed,
            options.character.map(|c| c.name()).unwrap_or("rotate"),
        );
    }

    let report = run_simulation(&config);

    if options.quiet {
        print_summary_line(&report);
    } else if options.json {
        println!("{}", report.to_json());
    } else {
        println!();
        print!("{}", report.to_text());
    }
}
