/*
 *  display/manager.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Frame renderer - clears the board and draws up to two rows
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

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

use crate::display::color::LinePalette;
use crate::display::components::TrainRow;
use crate::display::error::DisplayError;
use crate::display::layout::{LayoutConfig, Section};
use crate::display::scroll::ScrollEngine;
use crate::display::traits::{BoxedSurface, PixelSurface};
use crate::trains::TrainArrival;

/// Renderer shared between the poll loop, the redraw tick and shutdown.
/// Holding the lock covers a whole clear+draw+flush.
pub type SharedRenderer = Arc<tokio::sync::Mutex<FrameRenderer>>;

/// Performance metrics for frame rendering
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// Total frame time (draw + flush)
    pub frame_time_us: u64,

    /// Time spent drawing rows
    pub render_time_us: u64,

    /// Time spent pushing to the panel
    pub transfer_time_us: u64,

    /// Frame counter
    pub frame_count: u64,

    /// Average frame time over recent frames
    pub avg_frame_time_us: u64,

    /// Budget per frame at the redraw rate
    pub target_frame_time_us: u64,
}

impl PerformanceMetrics {
    pub fn new(redraw_interval_ms: u64) -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            transfer_time_us: 0,
            frame_count: 0,
            avg_frame_time_us: 0,
            target_frame_time_us: redraw_interval_ms.max(1) * 1000,
        }
    }

    pub fn record_frame(&mut self, render_time_us: u64, transfer_time_us: u64) {
        self.render_time_us = render_time_us;
        self.transfer_time_us = transfer_time_us;
        self.frame_time_us = render_time_us + transfer_time_us;
        self.frame_count += 1;

        // Simple moving average (last frame + current) / 2
        if self.avg_frame_time_us == 0 {
            self.avg_frame_time_us = self.frame_time_us;
        } else {
            self.avg_frame_time_us = (self.avg_frame_time_us + self.frame_time_us) / 2;
        }

        if self.frame_time_us > self.target_frame_time_us {
            warn!(
                "Frame time {}μs exceeds redraw budget {}μs (render: {}μs, transfer: {}μs)",
                self.frame_time_us, self.target_frame_time_us, render_time_us, transfer_time_us
            );
        }
    }
}

/// Owns the surface, the scroll table and the row renderer
///
/// One instance per physical sign. Nothing here is global: tests build a
/// renderer over a `MockSurface` and drive it with a fixed clock.
pub struct FrameRenderer {
    /// Pixel sink (trait object)
    surface: BoxedSurface,

    /// Marquee state for every text field
    scroll: ScrollEngine,

    /// Row renderer
    row: TrainRow,

    /// Frame timing
    metrics: PerformanceMetrics,
}

impl FrameRenderer {
    /// Create a renderer over an initialized surface
    ///
    /// The layout is taken from the surface dimensions and validated, so a
    /// matrix too small for the fixed columns fails here and not mid-frame.
    pub fn new(
        surface: BoxedSurface,
        palette: LinePalette,
        speed_px_per_sec: f64,
        redraw_interval_ms: u64,
    ) -> Result<Self, DisplayError> {
        let caps = surface.capabilities().clone();
        let layout = LayoutConfig::for_surface(&caps);
        layout.validate().map_err(DisplayError::InvalidConfiguration)?;

        info!(
            "Frame renderer on {} {}x{}, status column {}px, scroll {}px/s",
            caps.name, caps.width, caps.height, layout.status_width(), speed_px_per_sec
        );

        Ok(Self {
            surface,
            scroll: ScrollEngine::new(),
            row: TrainRow::new(layout, palette, speed_px_per_sec),
            metrics: PerformanceMetrics::new(redraw_interval_ms),
        })
    }

    /// Wrap in the shared handle used by the run loop
    pub fn into_shared(self) -> SharedRenderer {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    pub fn layout(&self) -> &LayoutConfig {
        self.row.layout()
    }

    pub fn surface(&self) -> &dyn PixelSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn PixelSurface {
        self.surface.as_mut()
    }

    pub fn scroll(&self) -> &ScrollEngine {
        &self.scroll
    }

    pub fn performance_metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    /// Draw a frame at the current time
    pub fn render_frame(&mut self, trains: &[TrainArrival]) -> Result<(), DisplayError> {
        self.render_frame_at(trains, Instant::now())
    }

    /// Draw a frame as of `now`
    ///
    /// Clears the whole surface, draws the first train in the top row and
    /// the second in the bottom row, drops the rest, then flushes. Identical
    /// input and `now` yield identical drawing calls.
    pub fn render_frame_at(&mut self, trains: &[TrainArrival], now: Instant) -> Result<(), DisplayError> {
        let frame_start = Instant::now();

        self.surface.clear();

        if trains.len() > Section::ALL.len() {
            debug!("Dropping {} trains beyond the two rows", trains.len() - Section::ALL.len());
        }
        for (section, train) in Section::ALL.into_iter().zip(trains) {
            self.row.render(self.surface.as_mut(), &mut self.scroll, section, train, now);
        }

        let render_time = frame_start.elapsed().as_micros() as u64;

        let transfer_start = Instant::now();
        self.surface.flush()?;
        let transfer_time = transfer_start.elapsed().as_micros() as u64;

        self.metrics.record_frame(render_time, transfer_time);
        Ok(())
    }

    /// Blank the panel and push the blank frame
    pub fn clear_display(&mut self) -> Result<(), DisplayError> {
        self.surface.clear();
        self.surface.flush()
    }

    /// Current frame as text, when the surface keeps one
    pub fn debug_dump(&self) -> Option<String> {
        self.surface.debug_dump()
    }
}
