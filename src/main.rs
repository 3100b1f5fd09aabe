/*
 *  main.rs
 *
 *  fgsign - next trains, two panels
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use std::time::Duration;
use anyhow::Context;
use chrono::Local;
use env_logger::Env;
use log::{error, info, warn};
use tokio::signal::unix::{signal, SignalKind}; // Import specific Unix signals

use fgsign::config::{self, DriverKind};
use fgsign::display::{FrameRenderer, SurfaceFactory};
use fgsign::feed::{self, FeedClient, PollSettings};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

async fn signal_handler() -> Result<(), std::io::Error> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load().context("loading configuration")?;

    // Initialize the logger with the configured level, debug flag wins
    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("{} - next trains, two panels", env!("CARGO_PKG_NAME"));
    info!("v.{} built {} ({})", env!("CARGO_PKG_VERSION"), BUILD_DATE, BUILD_PROFILE);
    info!("Started {}", Local::now().format("%a %b %d %H:%M:%S"));

    let mut surface = SurfaceFactory::create_from_config(&cfg.display)
        .context("creating display surface")?;
    surface.init().context("initializing display")?;
    if let Err(e) = surface.set_brightness(cfg.display.brightness) {
        warn!("Brightness {}% not applied: {}", cfg.display.brightness, e);
    }

    let renderer = FrameRenderer::new(
        surface,
        cfg.colors.palette(),
        cfg.scroll.speed_px_per_sec,
        cfg.scroll.redraw_interval_ms,
    )
    .context("building frame renderer")?
    .into_shared();

    let client = FeedClient::new(&cfg.feed).context("building feed client")?;
    let settings = PollSettings {
        interval: Duration::from_secs(cfg.feed.interval_secs),
        redraw_interval: Duration::from_millis(cfg.scroll.redraw_interval_ms),
        log_frames: cfg.display.driver == DriverKind::Mock,
    };

    // Main application loop
    tokio::select! {
        // Handle Unix signals for graceful shutdown
        res = signal_handler() => {
            if let Err(e) = res {
                error!("Signal handler failed: {}", e);
            }
        }
        _ = feed::run_poll_loop(client, renderer.clone(), settings) => {
            info!("Closed Application Loop.");
        }
    }

    info!("Main application exiting. Clearing display.");
    renderer
        .lock()
        .await
        .clear_display()
        .context("clearing display on shutdown")?;

    Ok(())
}
