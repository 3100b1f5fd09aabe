/*
 *  display/mod.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Rendering pipeline for the LED matrix
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod framebuffer;
pub mod target;
pub mod factory;
pub mod color;

// Pixel surfaces
pub mod drivers;

// Fixed geometry of the two rows
pub mod layout;

// Shapes, letters and marquees
pub mod glyphs;
pub mod scroll;

// UI components
pub mod components;

// Frame renderer
pub mod manager;

// Re-exports for convenience
pub use traits::{BoxedSurface, PixelSurface, SurfaceCapabilities};
pub use error::{DisplayError, DisplayFactoryError};
pub use framebuffer::FrameBuffer;
pub use factory::SurfaceFactory;
pub use color::{Color, LinePalette};
pub use layout::{ComponentGeometry, LayoutConfig, Section, SectionBounds};
pub use scroll::{ScrollEngine, ScrollKey, TextField, text_width};
pub use components::TrainRow;
pub use manager::{FrameRenderer, SharedRenderer};
pub use drivers::mock::{MockSurface, SurfaceOp};

#[cfg(feature = "hardware")]
pub use drivers::rgb_matrix::RgbMatrixSurface;
