/*
 *  display/drivers/mock.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  In-memory surface for tests and hardware-free runs
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

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::DisplayConfig;
use crate::display::error::DisplayError;
use crate::display::framebuffer::FrameBuffer;
use crate::display::traits::{PixelSurface, SurfaceCapabilities};

use std::sync::{Arc, Mutex, MutexGuard};

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    SetPixel { x: i32, y: i32, color: Rgb888 },
    FillRect { area: Rectangle, color: Rgb888 },
    Clear,
}

/// Mock surface for testing
///
/// Draws into a framebuffer without any hardware. It's useful for:
/// - Unit and integration tests
/// - Running the sign on a laptop
///
/// With recording enabled every drawing call is appended to an operation
/// log so tests can compare whole frames call by call.
#[derive(Debug, Clone)]
pub struct MockSurface {
    /// Framebuffer for drawing operations
    framebuffer: FrameBuffer,

    /// Surface capabilities
    capabilities: SurfaceCapabilities,

    /// Shared state for testing
    state: Arc<Mutex<MockSurfaceState>>,
}

/// Internal state for the mock surface (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockSurfaceState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of times flush() was called
    pub flush_count: usize,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Last brightness value set
    pub last_brightness: Option<u8>,

    /// Whether the surface is initialized
    pub is_initialized: bool,

    /// Record drawing calls into `ops`
    pub recording: bool,

    /// Drawing calls since the last take_ops()
    pub ops: Vec<SurfaceOp>,

    /// Copy of the framebuffer at the last flush
    pub last_frame: Option<FrameBuffer>,

    /// Simulate failures (for error testing)
    pub simulate_flush_failure: bool,
    pub simulate_init_failure: bool,
}

fn lock(state: &Mutex<MockSurfaceState>) -> MutexGuard<'_, MockSurfaceState> {
    // a panicking test thread must not take the surface down with it
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockSurface {
    /// Create a mock surface sized from the display configuration
    pub fn new(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let (width, height) = (config.matrix_width(), config.height);
        if width == 0 || height == 0 {
            return Err(DisplayError::InvalidConfiguration(format!(
                "mock surface needs a non-empty matrix, got {}x{}",
                width, height
            )));
        }
        Ok(Self::new_with_size(width, height))
    }

    /// Create a mock surface with specific dimensions
    pub fn new_with_size(width: u32, height: u32) -> Self {
        let capabilities = SurfaceCapabilities {
            width,
            height,
            supports_brightness: true,
            name: "mock",
        };

        Self {
            framebuffer: FrameBuffer::new(width, height, Rgb888::BLACK),
            capabilities,
            state: Arc::new(Mutex::new(MockSurfaceState::default())),
        }
    }

    /// Start recording drawing calls into the operation log
    pub fn with_recording(self) -> Self {
        lock(&self.state).recording = true;
        self
    }

    /// Get pixel at position for testing
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.framebuffer.get(x, y)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockSurfaceState>> {
        Arc::clone(&self.state)
    }

    /// Drain the operation log
    pub fn take_ops(&self) -> Vec<SurfaceOp> {
        std::mem::take(&mut lock(&self.state).ops)
    }

    /// Count lit pixels
    pub fn count_lit(&self) -> usize {
        self.framebuffer.count_lit()
    }

    pub fn to_ascii(&self) -> String {
        self.framebuffer.to_ascii()
    }

    fn record(&self, op: SurfaceOp) {
        let mut state = lock(&self.state);
        if state.recording {
            state.ops.push(op);
        }
    }
}

impl PixelSurface for MockSurface {
    fn capabilities(&self) -> &SurfaceCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = lock(&self.state);

        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("Simulated init failure".to_string()));
        }

        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), DisplayError> {
        if percent == 0 || percent > 100 {
            return Err(DisplayError::InvalidBrightness(percent));
        }
        lock(&self.state).last_brightness = Some(percent);
        Ok(())
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb888) {
        self.record(SurfaceOp::SetPixel { x, y, color });
        self.framebuffer.set(x, y, color);
    }

    fn fill_rect(&mut self, area: &Rectangle, color: Rgb888) {
        self.record(SurfaceOp::FillRect { area: *area, color });
        for point in area.points() {
            self.framebuffer.set(point.x, point.y, color);
        }
    }

    fn clear(&mut self) {
        {
            let mut state = lock(&self.state);
            state.clear_count += 1;
            if state.recording {
                state.ops.push(SurfaceOp::Clear);
            }
        }
        self.framebuffer.fill(Rgb888::BLACK);
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut state = lock(&self.state);

        if state.simulate_flush_failure {
            return Err(DisplayError::FlushFailed("Simulated flush failure".to_string()));
        }

        state.flush_count += 1;
        state.last_frame = Some(self.framebuffer.clone());
        Ok(())
    }

    fn debug_dump(&self) -> Option<String> {
        Some(self.framebuffer.to_ascii())
    }
}
