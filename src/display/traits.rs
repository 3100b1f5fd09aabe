/*
 *  display/traits.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for pixel surface abstraction
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

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::Rectangle;
use crate::display::error::DisplayError;

/// Surface capabilities and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    /// Matrix width in pixels (all chained panels)
    pub width: u32,

    /// Matrix height in pixels
    pub height: u32,

    /// Whether the surface supports brightness control
    pub supports_brightness: bool,

    /// Human readable name for logs
    pub name: &'static str,
}

/// Minimal hardware abstraction - every pixel sink implements this trait
///
/// Rendering code is written against this capability only. Drawing calls are
/// infallible: a coordinate outside `[0,width) x [0,height)` is dropped by the
/// surface itself, never reported to the caller.
pub trait PixelSurface: Send {
    /// Returns the capabilities of this surface
    fn capabilities(&self) -> &SurfaceCapabilities;

    /// Returns the surface dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Whether (x, y) lands on the surface
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        let (w, h) = self.dimensions();
        x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h
    }

    /// Bring up the hardware
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Set brightness in percent (1-100)
    fn set_brightness(&mut self, percent: u8) -> Result<(), DisplayError> {
        if !self.capabilities().supports_brightness {
            return Err(DisplayError::UnsupportedOperation);
        }
        if percent == 0 || percent > 100 {
            return Err(DisplayError::InvalidBrightness(percent));
        }
        Err(DisplayError::UnsupportedOperation)
    }

    /// Set one pixel; out of range coordinates are silently dropped
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb888);

    /// Fill a rectangle, clipped to the surface
    fn fill_rect(&mut self, area: &Rectangle, color: Rgb888) {
        if area.size.width == 0 || area.size.height == 0 {
            return;
        }
        let top_left = area.top_left;
        for y in top_left.y..top_left.y + area.size.height as i32 {
            for x in top_left.x..top_left.x + area.size.width as i32 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Blank the whole surface
    fn clear(&mut self);

    /// Push the drawn frame to the panel (vsync swap on hardware)
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Text rendering of the current frame, for surfaces that keep one
    fn debug_dump(&self) -> Option<String> {
        None
    }
}

/// Type alias for boxed surface trait objects
pub type BoxedSurface = Box<dyn PixelSurface>;
