use color_eyre::{eyre::eyre, Result};
use padstep::app::PadstepApp;
use padstep::config::Config;
use padstep::headless;
use padstep::input::{gilrs_source, GamepadSource, VirtualGamepads};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = load_config()?;
    setup_logging_env(config.log_level()?);
    info!("Starting padstep with controller settings: {:?}", config.controller);

    let gamepads = open_gamepads();

    if config.display.headless {
        let token = CancellationToken::new();
        let shutdown = token.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
            info!("Shutdown requested");
            shutdown.cancel();
        });

        let report = headless::run(&config, gamepads, token).await;
        info!(
            "Finished after {} frames at ({:.1}, {:.1})",
            report.frames, report.final_position.x, report.final_position.y
        );
        return Ok(());
    }

    info!("Starting window");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.display.window_title.clone())
            .with_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    let title = config.display.window_title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(PadstepApp::new(cc, &config, gamepads)))),
    )
    .map_err(|e| eyre!("Window failed: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    Ok(())
}

fn setup_logging_env(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

fn load_config() -> Result<Config> {
    let Some(path) = Config::default_path() else {
        return Ok(Config::default());
    };
    Config::load_or_default(&path).map_err(|e| eyre!("Failed to load {:?}: {}", path, e))
}

/// gilrs when available, an empty virtual source otherwise.
fn open_gamepads() -> Box<dyn GamepadSource> {
    match gilrs_source::open() {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            warn!("Gamepad backend unavailable ({}), keyboard only", e);
            Box::new(VirtualGamepads::new())
        }
    }
}
