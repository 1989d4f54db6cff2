use std::time::Duration;

use chrono::Local;
use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::{info, warn};

use coachdesk::cli::Cli;
use coachdesk::events::{AppEvent, EventPump};
use coachdesk::key_handler::KeyHandler;
use coachdesk::{logging, Config, Screen, Store};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = cli.apply(Config::load_or_create(&config_path)?);

    match cli.log_file.clone().or_else(logging::default_log_path) {
        Some(log_path) => logging::init(&log_path, &config.log_level)?,
        None => eprintln!("coachdesk: no data directory, logging disabled"),
    }
    info!(config = %config_path.display(), "starting coachdesk");

    let today = Local::now().date_naive();
    let store = match &config.data_file {
        Some(path) => Store::load(path)?,
        None => {
            warn!("no data file configured, using sample data");
            Store::sample(today)
        }
    };

    let mut screen = Screen::new(
        store.into_dashboard(&config, today),
        today,
        config.recent_clients_limit,
    );
    if cli.starts_in_dashboard() {
        screen.open_dashboard();
    }

    let terminal = ratatui::init();
    let result = run(terminal, screen, Duration::from_millis(config.tick_rate_ms));
    ratatui::restore();
    info!("exiting");
    result
}

fn run(mut terminal: DefaultTerminal, mut screen: Screen, tick_rate: Duration) -> color_eyre::Result<()> {
    let key_handler = KeyHandler::new();
    let events = EventPump::spawn(tick_rate)?;

    loop {
        if screen.needs_redraw() {
            let mut rendered = Ok(());
            terminal.draw(|frame| rendered = screen.render(frame))?;
            rendered?;
        }

        let Some(event) = events.next() else {
            warn!("event channel closed");
            break;
        };
        match event {
            AppEvent::Key(key) => {
                let action = key_handler.on_key_event(key, screen.input_mode()?);
                if screen.handle_action(action)? {
                    break;
                }
            }
            AppEvent::Resize(..) => screen.mark_dirty(),
            AppEvent::Tick => {}
        }
    }
    Ok(())
}
