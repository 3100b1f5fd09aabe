/*
 *  display/factory.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Surface selection from configuration
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

use crate::config::{DisplayConfig, DriverKind};
use crate::display::drivers::mock::MockSurface;
use crate::display::error::DisplayFactoryError;
use crate::display::layout::LayoutConfig;
use crate::display::traits::BoxedSurface;
use log::{debug, info};

#[cfg(feature = "hardware")]
use crate::display::drivers::rgb_matrix::RgbMatrixSurface;

/// Factory for creating pixel surfaces from configuration
pub struct SurfaceFactory;

impl SurfaceFactory {
    /// Create a surface from configuration
    ///
    /// The configuration is validated first so a bad panel geometry is
    /// reported before any hardware is touched. Asking for the RGB matrix in
    /// a build without the `hardware` feature is an error, not a fallback.
    pub fn create_from_config(config: &DisplayConfig) -> Result<BoxedSurface, DisplayFactoryError> {
        Self::validate_config(config)?;

        info!(
            "Creating {:?} surface {}x{}",
            config.driver,
            config.matrix_width(),
            config.height
        );

        match config.driver {
            DriverKind::Mock => Ok(Box::new(MockSurface::new(config)?)),

            #[cfg(feature = "hardware")]
            DriverKind::RgbMatrix => Ok(Box::new(RgbMatrixSurface::new(config)?)),

            #[cfg(not(feature = "hardware"))]
            DriverKind::RgbMatrix => Err(DisplayFactoryError::DriverNotCompiled("hardware")),
        }
    }

    /// Validate a configuration without creating a surface
    pub fn validate_config(config: &DisplayConfig) -> Result<(), DisplayFactoryError> {
        let layout = LayoutConfig {
            width: config.matrix_width(),
            height: config.height,
            ..LayoutConfig::default()
        };
        layout.validate().map_err(DisplayFactoryError::ConfigError)?;

        if config.brightness == 0 || config.brightness > 100 {
            return Err(DisplayFactoryError::ConfigError(format!(
                "Invalid brightness: {} (must be 1-100)",
                config.brightness
            )));
        }

        debug!("Display config ok: {:?}", config);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::traits::PixelSurface;

    #[test]
    fn test_create_mock_surface() {
        let surface = SurfaceFactory::create_from_config(&DisplayConfig::default()).unwrap();
        assert_eq!(surface.dimensions(), (128, 32));
        assert_eq!(surface.capabilities().name, "mock");
    }

    #[test]
    fn test_validate_config_narrow_matrix() {
        let config = DisplayConfig { panel_count: 1, ..Default::default() };
        assert!(matches!(
            SurfaceFactory::validate_config(&config),
            Err(DisplayFactoryError::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_config_invalid_brightness() {
        let config = DisplayConfig { brightness: 0, ..Default::default() };
        assert!(SurfaceFactory::validate_config(&config).is_err());
        let config = DisplayConfig { brightness: 101, ..Default::default() };
        assert!(SurfaceFactory::validate_config(&config).is_err());
    }

    #[cfg(not(feature = "hardware"))]
    #[test]
    fn test_rgbmatrix_needs_feature() {
        let config = DisplayConfig { driver: DriverKind::RgbMatrix, ..Default::default() };
        assert!(matches!(
            SurfaceFactory::create_from_config(&config),
            Err(DisplayFactoryError::DriverNotCompiled(_))
        ));
    }
}
