use idlehunt::catalog::Catalog;
use idlehunt::character::save::{JsonStore, StoreError};
use idlehunt::commands::Command;
use idlehunt::config::{usage, ConfigError, EngineConfig};
use idlehunt::core::engine::{now_ms, run_session, stop_on_interrupt, Engine, SaveWorker};
use idlehunt::core::tick::TickEvent;
use idlehunt::events::log_message;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config = match EngineConfig::from_args(&args) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{}", usage());
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'idlehunt --help' for usage.");
            std::process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &EngineConfig) -> Result<(), StoreError> {
    let store = match &config.save_dir {
        Some(dir) => JsonStore::with_dir(dir.clone())?,
        None => JsonStore::new()?,
    };
    log::info!("saves in {}", store.dir().display());

    let (mut engine, report) = Engine::load_or_register(
        &store,
        &config.account,
        config.new_name.as_deref(),
        Catalog::default_content(),
        now_ms(),
    )?;
    if let Some(report) = &report {
        println!("{}", report.to_text(engine.catalog()));
    }

    if let Some(vocation) = config.vocation {
        if engine.state().vocation != vocation {
            if let Err(reason) = engine.execute(Command::ChooseVocation { vocation }, now_ms()) {
                eprintln!("Cannot choose {}: {}", vocation.name(), reason);
            }
        }
    }
    if let Some(start) = &config.start {
        if let Err(reason) = engine.execute(start.to_command(), now_ms()) {
            eprintln!("Cannot start: {}", reason);
        }
    }

    let saver = SaveWorker::spawn(store, config.account.clone());
    let stop = Arc::new(AtomicBool::new(false));
    stop_on_interrupt(Arc::clone(&stop));
    let ticks = run_session(&mut engine, &saver, config, &stop, |_, result| {
        for event in &result.events {
            if matches!(
                event,
                TickEvent::PlayerAttack { .. } | TickEvent::MonsterMissed { .. }
            ) {
                continue;
            }
            println!("{}", log_message(event));
        }
    });

    let state = engine.snapshot_for_save(now_ms());
    println!(
        "{} - level {} {} | {} gold | {}/{} hp",
        state.name,
        state.level,
        state.vocation.name(),
        state.gold,
        state.hp,
        state.max_hp
    );
    log::info!("session ended after {} ticks", ticks);
    saver.finish(state)
}
