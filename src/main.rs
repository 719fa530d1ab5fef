use chrono::Utc;
use magic_survivors::core::constants::TICK_INTERVAL_MS;
use magic_survivors::core::run_state::{RunConfig, RunState};
use magic_survivors::core::tick::{game_tick, TickEvent};
use magic_survivors::data::characters::CharacterClass;
use magic_survivors::meta::{MetaProgression, MetaUpgradeType, RunHistory, RunRecord};
use magic_survivors::progression::PendingChoice;
use magic_survivors::simulator::auto_choose;
use magic_survivors::utils::build_info::version_line;
use magic_survivors::utils::persistence::PrefsStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None | Some("--help") | Some("-h") => {
            print_help();
            Ok(())
        }
        Some("--version") | Some("-v") => {
            println!("{}", version_line("magic-survivors"));
            Ok(())
        }
        Some("run") => run_command(&args[2..]),
        Some("shop") => {
            shop_command();
            Ok(())
        }
        Some("buy") => buy_command(&args[2..]),
        Some("history") => {
            history_command();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'magic-survivors --help' for usage.");
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!("Magic Survivors - headless run engine\n");
    println!("Usage: magic-survivors <command>\n");
    println!("Commands:");
    println!("  run [--character C] [--seed N]  Play a run and bank its rewards");
    println!("  shop                            List meta upgrades");
    println!("  buy <upgrade>                   Buy the next level of an upgrade");
    println!("  history                         Show recent runs");
    println!("  --version                       Show version information");
    println!("  --help                          Show this help message");
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn load_meta() -> MetaProgression {
    match PrefsStore::open_default() {
        Ok(store) => MetaProgression::load(store),
        Err(e) => {
            warn!(error = %e, "no config directory, progress will not be saved");
            MetaProgression::in_memory()
        }
    }
}

fn run_command(args: &[String]) -> io::Result<()> {
    let mut character = CharacterClass::FireMage;
    let mut seed = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--character" | "-c" => {
                i += 1;
                let name = args.get(i).map(String::as_str).unwrap_or("");
                character = CharacterClass::from_name(name)
                    .ok_or_else(|| invalid_input(format!("unknown character: {name}")))?;
            }
            "--seed" | "-s" => {
                i += 1;
                let value = args.get(i).and_then(|v| v.parse::<u64>().ok());
                seed = Some(value.ok_or_else(|| invalid_input("--seed requires a number".into()))?);
            }
            other => return Err(invalid_input(format!("unknown option: {other}"))),
        }
        i += 1;
    }

    let mut meta = load_meta();
    let config = RunConfig::for_character(character).with_bonuses(meta.bonuses());
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let def = character.definition();
    println!("{} - {}", def.name, def.passive_description);

    let dt = TICK_INTERVAL_MS as f64 / 1000.0;
    let mut state = RunState::new(config);
    while !state.is_over() {
        while let Some(choice) = state.pending_choice().cloned() {
            auto_choose(&mut state, &mut rng);
            print_choice(&choice, &state);
        }
        let result = game_tick(&mut state, dt, &mut rng);
        for event in &result.events {
            print_event(event, &state);
        }
    }

    let summary = state.summary();
    let (Some(outcome), Some(rewards)) = (summary.outcome, summary.rewards) else {
        return Ok(());
    };
    meta.bank_rewards(&rewards);
    println!(
        "Banked {} gold and {} magic stones (total: {} gold, {} stones)",
        rewards.total_gold(),
        rewards.magic_stones,
        meta.total_gold(),
        meta.magic_stones()
    );

    let record = RunRecord::new(
        character,
        outcome,
        summary.elapsed_secs,
        summary.level,
        summary.kills,
        summary.mini_bosses_defeated,
        rewards,
        Utc::now().timestamp(),
    );
    match RunHistory::default_path() {
        Ok(path) => {
            let mut history = RunHistory::load(&path);
            history.record(record);
            if let Err(e) = history.save(&path) {
                warn!(error = %e, "failed to save run history");
            }
        }
        Err(e) => warn!(error = %e, "run history not saved"),
    }
    Ok(())
}

fn timestamp(state: &RunState) -> String {
    let secs = state.clock.elapsed() as u64;
    format!("[{:02}:{:02}]", secs / 60, secs % 60)
}

fn print_choice(choice: &PendingChoice, state: &RunState) {
    match choice {
        PendingChoice::LevelUp { level, .. } => {
            let skills: Vec<String> = state
                .loadout
                .iter()
                .map(|s| format!("{} {}", s.definition().name, s.level()))
                .collect();
            println!("{} Level {} -> {}", timestamp(state), level, skills.join(", "));
        }
        PendingChoice::Evolution { gate, .. } => {
            let evolved: Vec<&str> = state
                .loadout
                .iter()
                .filter_map(|s| s.evolution())
                .map(|e| e.name())
                .collect();
            println!("{} Gate {} evolution -> {}", timestamp(state), gate, evolved.join(", "));
        }
    }
}

fn print_event(event: &TickEvent, state: &RunState) {
    let at = timestamp(state);
    match event {
        TickEvent::GateReached { gate, .. } => println!("{} Gate reached: {:?}", at, gate),
        TickEvent::StageChanged { stage } => println!("{} Entering the {}", at, stage.name()),
        TickEvent::BossSpawned { kind, .. } => println!("{} {} appears!", at, kind.name()),
        TickEvent::SynergyActivated { synergy } => {
            println!("{} Synergy activated: {}", at, synergy.name())
        }
        TickEvent::PlayerDied => println!("{} You have fallen.", at),
        TickEvent::RunEnded { outcome, .. } => {
            let s = state.summary();
            println!(
                "{} {}! Level {}, {} kills, {} mini-bosses",
                at,
                outcome.name(),
                s.level,
                s.kills,
                s.mini_bosses_defeated
            );
        }
        _ => {}
    }
}

fn shop_command() {
    let meta = load_meta();
    println!(
        "Gold: {}   Magic stones: {}\n",
        meta.total_gold(),
        meta.magic_stones()
    );
    for upgrade in meta.upgrades() {
        let t = upgrade.upgrade_type;
        let unit = if t.is_percent() { "%" } else { "" };
        let cost = if upgrade.is_maxed() {
            "MAX".to_string()
        } else {
            format!("{} gold", upgrade.cost_for_next_level())
        };
        println!(
            "  {:<20} {:>2}/{:<2}  +{}{:<4}  next: {:<10} {}",
            t.name(),
            upgrade.level,
            upgrade.max_level,
            upgrade.current_value(),
            unit,
            cost,
            t.description()
        );
    }
}

fn buy_command(args: &[String]) -> io::Result<()> {
    let name = args.join(" ");
    let upgrade_type = MetaUpgradeType::from_name(&name)
        .ok_or_else(|| invalid_input(format!("unknown upgrade: {name}")))?;

    let mut meta = load_meta();
    let cost = meta
        .upgrade(upgrade_type)
        .map(|u| u.cost_for_next_level())
        .unwrap_or(0);
    if meta.purchase(upgrade_type) {
        let level = meta.upgrade(upgrade_type).map(|u| u.level).unwrap_or(0);
        println!(
            "Bought {} level {} for {} gold ({} left)",
            upgrade_type.name(),
            level,
            cost,
            meta.total_gold()
        );
        Ok(())
    } else if meta.upgrade(upgrade_type).is_some_and(|u| u.is_maxed()) {
        Err(invalid_input(format!("{} is already maxed", upgrade_type.name())))
    } else {
        Err(invalid_input(format!(
            "{} costs {} gold, you have {}",
            upgrade_type.name(),
            cost,
            meta.total_gold()
        )))
    }
}

fn history_command() {
    let history = match RunHistory::default_path() {
        Ok(path) => RunHistory::load(&path),
        Err(e) => {
            warn!(error = %e, "run history unavailable");
            RunHistory::default()
        }
    };
    if history.runs.is_empty() {
        println!("No runs yet.");
        return;
    }
    println!(
        "{} runs, {} victories\n",
        history.runs.len(),
        history.victories()
    );
    for run in history.runs.iter().rev().take(10) {
        let when = chrono::DateTime::from_timestamp(run.finished_at, 0)
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "  {}  {:<12} {:<8} {:>5.0}s  L{:<3} {:>4} kills  +{} gold",
            when,
            run.character.name(),
            run.outcome.name(),
            run.elapsed_secs,
            run.level,
            run.kills,
            run.rewards.total_gold()
        );
    }
}
