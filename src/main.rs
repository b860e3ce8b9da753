use cabinet_input::backend::{GilrsBackend, SharedBackend};
use cabinet_input::config::{InputConfig, UpdateStrategy};
use cabinet_input::input::{InputEvent, Session, Topic};
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, trace, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;

    let config = match std::env::args().nth(1) {
        Some(path) => InputConfig::load_from(&PathBuf::from(path))?,
        None => InputConfig::load()?,
    };
    setup_logging(config.level());
    info!("Starting cabinet input with {:?}", config);

    let backend: SharedBackend = Arc::new(Mutex::new(GilrsBackend::new(config.axis_deadzone)));
    let mut session = Session::new(&config);
    session
        .init(backend)
        .map_err(|e| eyre!("Failed to start input session: {}", e))?;

    let mut events = session.subscribe_many(&Topic::ALL);
    session.on_tick(|attached| trace!("Frame tick, {} pads attached", attached))?;

    let manual = config.update_strategy == UpdateStrategy::Manual;
    if manual {
        session.start_polling()?;
    }
    let mut frame = tokio::time::interval(config.frame_interval());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            dispatched = session.dispatch_next(), if manual => {
                if !dispatched {
                    warn!("Gamepad backend went away");
                    break;
                }
            }
            _ = frame.tick(), if !manual => {
                session.poll_once();
            }
            Some(event) = events.recv() => log_event(&event),
        }
    }

    session.teardown();
    Ok(())
}

fn log_event(event: &InputEvent) {
    match event {
        InputEvent::GamepadConnected(info) => {
            info!("gamepad_connected [{}] {}", info.index, info.name)
        }
        InputEvent::GamepadDisconnected(info) => {
            info!("gamepad_disconnected [{}] {}", info.index, info.name)
        }
        InputEvent::ButtonDown { button, pad } => info!("button_down {} pad={:?}", button, pad),
        InputEvent::ButtonUp { button, pad } => info!("button_up {} pad={:?}", button, pad),
    }
}

fn setup_logging(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}
