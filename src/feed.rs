/*
 *  feed.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Upstream arrivals client and the poll/redraw loop
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use log::{debug, error, info, warn};
use reqwest::{Client, StatusCode, header};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{self, MissedTickBehavior};

use crate::config::FeedConfig;
use crate::display::manager::SharedRenderer;
use crate::trains::{TrainArrival, next_arrivals};

/// Status shown on both rows when the upstream answers with an error code
pub const BAD_RESPONSE_STATUS: &str = "Bad response";

/// Failures talking to the upstream arrivals service
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Bad response: HTTP {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FeedError {
    /// Rows drawn in place of arrivals so the sign shows what went wrong
    pub fn placeholders(&self) -> Vec<TrainArrival> {
        match self {
            FeedError::Status(_) => vec![
                TrainArrival::placeholder(BAD_RESPONSE_STATUS),
                TrainArrival::placeholder(BAD_RESPONSE_STATUS),
            ],
            other => vec![TrainArrival::placeholder(&other.to_string())],
        }
    }
}

/// Decode the upstream JSON array; any unknown line rejects the whole body
pub fn parse_arrivals(body: &str) -> Result<Vec<TrainArrival>, FeedError> {
    Ok(serde_json::from_str(body)?)
}

/// HTTP client for the arrivals endpoint
#[derive(Debug, Clone)]
pub struct FeedClient {
    url: String,
    client: Client,
}

impl FeedClient {
    /// Creates a new `FeedClient` with populated headers and timeouts.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));
        headers.insert("Connection", header::HeaderValue::from_static("close"));

        let timeout = Duration::from_millis(config.timeout_ms.max(1));
        let client = Client::builder()
            .connect_timeout(timeout)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { url: config.url.clone(), client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the endpoint and keep the two soonest arrivals
    pub async fn fetch(&self) -> Result<Vec<TrainArrival>, FeedError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        let arrivals = parse_arrivals(&body)?;
        debug!("{} arrivals from {}", arrivals.len(), self.url);
        Ok(next_arrivals(arrivals))
    }

    /// Arrivals, or the placeholder rows describing the failure
    pub async fn fetch_or_placeholders(&self) -> Vec<TrainArrival> {
        match self.fetch().await {
            Ok(trains) => trains,
            Err(e) => {
                warn!("Feed fetch from {} failed: {}", self.url, e);
                e.placeholders()
            }
        }
    }
}

/// One log line per row, as the hardware-free run prints it
pub fn frame_summary(trains: &[TrainArrival]) -> Vec<String> {
    trains
        .iter()
        .take(2)
        .enumerate()
        .map(|(i, t)| {
            let kind = if t.express { "(express)" } else { "(local)" };
            format!("[MOCK DISPLAY] Train {} {} {}: {}", i + 1, t.line, kind, t.status)
        })
        .collect()
}

/// Timing for the run loop
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub redraw_interval: Duration,
    /// Log row summaries and the frame dump after each fetch
    pub log_frames: bool,
}

async fn draw(renderer: &SharedRenderer, trains: &[TrainArrival]) {
    let mut r = renderer.lock().await;
    if let Err(e) = r.render_frame(trains) {
        error!("Render failed: {}", e);
    }
}

/// Poll the feed forever, redrawing between polls so marquees keep moving.
///
/// There is no retry or backoff: a failed fetch shows placeholder rows and
/// the next tick tries again. Cancel by dropping the future.
pub async fn run_poll_loop(client: FeedClient, renderer: SharedRenderer, settings: PollSettings) {
    info!(
        "Polling {} every {:?}, redraw every {:?}",
        client.url(), settings.interval, settings.redraw_interval
    );

    let mut poll = time::interval(settings.interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut redraw = time::interval(settings.redraw_interval);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut current: Vec<TrainArrival> = Vec::new();

    loop {
        tokio::select! {
            _ = poll.tick() => {
                current = client.fetch_or_placeholders().await;
                draw(&renderer, &current).await;

                if settings.log_frames {
                    for line in frame_summary(&current) {
                        info!("{}", line);
                    }
                    if log::log_enabled!(log::Level::Debug) {
                        if let Some(dump) = renderer.lock().await.debug_dump() {
                            debug!("frame:\n{}", dump);
                        }
                    }
                }
            }
            _ = redraw.tick() => {
                if !current.is_empty() {
                    draw(&renderer, &current).await;
                }
            }
        }
    }
}
