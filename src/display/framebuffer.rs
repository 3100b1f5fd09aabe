/*
 *  display/framebuffer.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime-sized RGB framebuffer
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

/// A runtime-sized RGB framebuffer, row major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    buf: Vec<Rgb888>,
    w: usize,
    h: usize,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, fill: Rgb888) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 {
            let (x, y) = (x as usize, y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.idx(x, y).map(|i| self.buf[i])
    }

    /// Returns false when the pixel fell outside the buffer
    pub fn set(&mut self, x: i32, y: i32, color: Rgb888) -> bool {
        match self.idx(x, y) {
            Some(i) => {
                self.buf[i] = color;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, color: Rgb888) {
        self.buf.fill(color);
    }

    /// Pixels that are not black
    pub fn count_lit(&self) -> usize {
        self.buf.iter().filter(|&&c| c != Rgb888::BLACK).count()
    }

    /// One character per pixel, '.' for black and '#' for anything lit
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.w + 1) * self.h);
        for row in self.buf.chunks(self.w.max(1)) {
            out.extend(row.iter().map(|&c| if c == Rgb888::BLACK { '.' } else { '#' }));
            out.push('\n');
        }
        out
    }
}
