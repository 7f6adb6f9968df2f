use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use log::LevelFilter;
use roadmap_core::{update, AppState, Msg};
use roadmap_logging::{roadmap_info, roadmap_warn};

use super::config::{load_config, AppConfig};
use super::effects::EffectRunner;
use super::ui::commands::{parse_line, AppEvent, HELP_TEXT};
use super::ui::render::render;

pub fn run_app() -> anyhow::Result<()> {
    let working_dir = std::env::current_dir().context("resolving working directory")?;
    let (config, config_error) = match load_config(&working_dir) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    roadmap_logging::initialize(config.log_destination(), LevelFilter::Info);
    if let Some(err) = config_error {
        roadmap_warn!("Using default settings: {}", err);
    }

    let engine_config = config.engine_config(&working_dir);
    roadmap_info!("Starting with {:?}", engine_config);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(engine_config, event_tx.clone())
        .context("starting the roadmap engine")?;
    spawn_input_reader(event_tx);

    let mut state = AppState::new();
    println!("{HELP_TEXT}\n");
    println!("{}", render(&state.view()));

    for event in event_rx.iter() {
        match event {
            AppEvent::Msg(msg) => {
                if let Msg::GenerationFinished { epoch, .. } = &msg {
                    if *epoch != state.epoch() {
                        roadmap_info!(
                            "Discarding stale generation result epoch={} current={}",
                            epoch,
                            state.epoch()
                        );
                    }
                }
                let (next, effects) = update(state, msg);
                state = next;
                runner.run(effects);
                if state.consume_dirty() {
                    println!("\n{}", render(&state.view()));
                }
            }
            AppEvent::Show => println!("\n{}", render(&state.view())),
            AppEvent::Help => println!("{HELP_TEXT}"),
            AppEvent::Quit => break,
        }
    }

    roadmap_info!("Exiting");
    Ok(())
}

/// Forwards stdin lines as events. End of input quits.
fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            for event in parse_line(&line) {
                if event_tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = event_tx.send(AppEvent::Quit);
    });
}
