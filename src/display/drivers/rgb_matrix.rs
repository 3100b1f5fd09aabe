/*
 *  display/drivers/rgb_matrix.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  HUB75 panel chain via the rpi-rgb-led-matrix library
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
use rpi_led_matrix::{LedCanvas, LedColor, LedMatrix, LedMatrixOptions, LedRuntimeOptions};

use crate::config::DisplayConfig;
use crate::display::error::DisplayError;
use crate::display::traits::{PixelSurface, SurfaceCapabilities};

use log::{debug, info};

// HUB75 tuning that keeps two chained panels flicker free on a Pi
const PWM_BITS: u8 = 7;
const PWM_LSB_NANOSECONDS: u32 = 130;
const LIMIT_REFRESH_RATE_HZ: u32 = 100;

/// Chained RGB matrix panels behind an Adafruit bonnet/HAT
///
/// Drawing goes to an offscreen canvas; `flush` swaps it onto the panels at
/// the next vsync. Brightness is applied to colors as they are set.
pub struct RgbMatrixSurface {
    matrix: LedMatrix,

    /// Offscreen canvas, None only while a swap is in flight
    canvas: Option<LedCanvas>,

    capabilities: SurfaceCapabilities,

    /// Percent, 1-100
    brightness: u8,
}

// Safety: the matrix and canvas handles are only touched through &mut self,
// and the renderer holding this surface sits behind a mutex.
unsafe impl Send for RgbMatrixSurface {}

impl RgbMatrixSurface {
    /// Open the panel chain described by `config`
    pub fn new(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let width = config.matrix_width();
        let height = config.height;

        info!(
            "Opening RGB matrix: {} x {}x{} panels, mapping {}, gpio slowdown {}",
            config.panel_count, config.panel_width, height,
            config.hardware_mapping, config.gpio_slowdown
        );

        let mut options = LedMatrixOptions::new();
        options.set_rows(height);
        options.set_cols(config.panel_width);
        options.set_chain_length(config.panel_count);
        options.set_parallel(1);
        options.set_hardware_mapping(&config.hardware_mapping);
        options
            .set_pwm_bits(PWM_BITS)
            .map_err(|e| DisplayError::InvalidConfiguration(e.to_string()))?;
        options.set_pwm_lsb_nanoseconds(PWM_LSB_NANOSECONDS);
        options.set_limit_refresh(LIMIT_REFRESH_RATE_HZ);

        let mut runtime = LedRuntimeOptions::new();
        runtime.set_gpio_slowdown(config.gpio_slowdown);

        let matrix = LedMatrix::new(Some(options), Some(runtime))
            .map_err(|e| DisplayError::InitializationFailed(e.to_string()))?;
        let canvas = matrix.offscreen_canvas();

        Ok(Self {
            matrix,
            canvas: Some(canvas),
            capabilities: SurfaceCapabilities {
                width,
                height,
                supports_brightness: true,
                name: "rgbmatrix",
            },
            brightness: 100,
        })
    }

    fn scale(&self, value: u8) -> u8 {
        ((value as u16 * self.brightness as u16) / 100) as u8
    }
}

impl PixelSurface for RgbMatrixSurface {
    fn capabilities(&self) -> &SurfaceCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.clear();
        self.flush()
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), DisplayError> {
        if percent == 0 || percent > 100 {
            return Err(DisplayError::InvalidBrightness(percent));
        }
        debug!("RGB matrix brightness {}%", percent);
        self.brightness = percent;
        Ok(())
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb888) {
        if !self.in_bounds(x, y) {
            return;
        }
        let led = LedColor {
            red: self.scale(color.r()),
            green: self.scale(color.g()),
            blue: self.scale(color.b()),
        };
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.set(x, y, &led);
        }
    }

    fn clear(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear();
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let canvas = self
            .canvas
            .take()
            .ok_or_else(|| DisplayError::FlushFailed("no offscreen canvas".to_string()))?;
        self.canvas = Some(self.matrix.swap(canvas));
        Ok(())
    }
}
