//! XR input bridge entry point.
//!
//! Loads configuration, starts a headset session, and runs the frame loop on
//! a Tokio interval until Ctrl-C or the requested frame count.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML + CLI overrides
//!  └─ XrSession::start()       -- validates the telemetry contract
//!  └─ window-manager task      -- click-to-focus on the shared model
//!  └─ frame loop (interval)
//!       └─ run_frame()         -- begin_frame / update_frame / end_frame
//! ```
//!
//! Without a headset runtime the bridge runs headless: telemetry comes from
//! the scripted `sway` pattern and the frame driver accepts every frame.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use xr_bridge::application::frame_loop::run_frame;
use xr_bridge::application::translate_input::XrSession;
use xr_bridge::infrastructure::{
    frame_driver::HeadlessFrameDriver,
    storage::config::{load_config, load_config_from},
    telemetry::{ScriptedTelemetrySource, TelemetryFrame},
    windowing::SharedInputModel,
};
use xr_core::domain::device::is_supported_manufacturer;

/// Command-line flags.  Each one overrides the matching config value.
#[derive(Debug, Parser)]
#[command(name = "xr-bridge", version, about = "Drive a desktop pointer and keyboard from XR controllers")]
struct Cli {
    /// Path to the config file.  Defaults to the platform config directory.
    #[arg(long, env = "XR_BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Pointer sensitivity multiplier.
    #[arg(long)]
    cursor_speed: Option<f32>,

    /// Stop after this many frames.  Runs until Ctrl-C when omitted.
    #[arg(long)]
    frames: Option<u64>,

    /// Frames per second.
    #[arg(long, default_value_t = 72)]
    frame_rate: u32,

    /// Headset manufacturer reported by the host.
    #[arg(long, env = "XR_MANUFACTURER", default_value = "META")]
    manufacturer: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("loading configuration")?;
    if let Some(speed) = cli.cursor_speed {
        config.input.cursor_speed = speed;
        config.validate().context("validating --cursor-speed")?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    info!("XR input bridge starting");
    if !is_supported_manufacturer(&cli.manufacturer) {
        warn!(manufacturer = %cli.manufacturer, "host is not a supported headset; continuing headless");
    }

    let windowing = Arc::new(SharedInputModel::new(
        config.display.screen_width,
        config.display.screen_height,
    ));
    let mut telemetry = ScriptedTelemetrySource::default();
    let mut driver = HeadlessFrameDriver::new();
    let mut session = XrSession::start(&telemetry, config.session_settings())
        .context("starting XR session")?;

    // ── Window-manager task ───────────────────────────────────────────────────
    let wm_model = Arc::clone(&windowing);
    let window_manager = tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_millis(50));
        loop {
            tick.tick().await;
            if let Some(column) = wm_model.click_to_focus() {
                info!(column, "window focused");
            }
        }
    });

    // ── Frame loop ────────────────────────────────────────────────────────────
    let period = Duration::from_secs_f64(1.0 / f64::from(cli.frame_rate.max(1)));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!(session = %session.id(), frame_rate = cli.frame_rate, "frame loop running");
    let mut frame: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
        if cli.frames.is_some_and(|limit| frame >= limit) {
            break;
        }

        telemetry.replace_pending(TelemetryFrame::sway(frame));
        if let Err(e) = run_frame(&mut driver, &mut session, &mut telemetry, windowing.as_ref()) {
            error!("frame {frame} failed: {e}");
            break;
        }
        frame += 1;
    }

    window_manager.abort();
    let pointer = windowing.input_snapshot().pointer;
    info!(
        session = %session.id(),
        frames = session.frames(),
        x = pointer.x,
        y = pointer.y,
        "XR input bridge stopped"
    );
    Ok(())
}
