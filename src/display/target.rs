/*
 *  display/target.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  embedded-graphics bridge onto a PixelSurface
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::display::traits::PixelSurface;

/// Borrowing DrawTarget over any surface.
///
/// DrawTarget is not dyn compatible, so the font renderer draws into this
/// wrapper and every pixel is forwarded to `PixelSurface::set_pixel`.
pub struct SurfaceTarget<'a, S: PixelSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: PixelSurface + ?Sized> SurfaceTarget<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self { surface }
    }
}

impl<S: PixelSurface + ?Sized> OriginDimensions for SurfaceTarget<'_, S> {
    fn size(&self) -> Size {
        let (w, h) = self.surface.dimensions();
        Size::new(w, h)
    }
}

impl<S: PixelSurface + ?Sized> DrawTarget for SurfaceTarget<'_, S> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            self.surface.set_pixel(p.x, p.y, c);
        }
        Ok(())
    }
}
