/*
 *  display/color.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Palette for the RGB matrix
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
use crate::constants::{F_TRAIN_COLOR, G_TRAIN_COLOR, TEXT_COLOR, UNKNOWN_LINE_COLOR};
use crate::trains::Line;

/// Named color value, resolved to Rgb888 when drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Black/Off
    Black,

    /// White/full on
    White,

    /// Explicit 24-bit color
    Rgb(u8, u8, u8),
}

impl Color {
    pub fn to_rgb888(&self) -> Rgb888 {
        match self {
            Color::Black => Rgb888::BLACK,
            Color::White => Rgb888::WHITE,
            Color::Rgb(r, g, b) => Rgb888::new(*r, *g, *b),
        }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Colors used by the row renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePalette {
    pub f_line: Color,
    pub g_line: Color,
    pub unknown_line: Color,
    /// Letters and text, independent of the indicator color
    pub text: Color,
    pub background: Color,
}

impl Default for LinePalette {
    fn default() -> Self {
        Self {
            f_line: F_TRAIN_COLOR.into(),
            g_line: G_TRAIN_COLOR.into(),
            unknown_line: UNKNOWN_LINE_COLOR.into(),
            text: TEXT_COLOR.into(),
            background: Color::Black,
        }
    }
}

impl LinePalette {
    /// Indicator color for a line
    pub fn line_color(&self, line: Line) -> Rgb888 {
        match line {
            Line::F => self.f_line.to_rgb888(),
            Line::G => self.g_line.to_rgb888(),
            Line::Unknown => self.unknown_line.to_rgb888(),
        }
    }

    pub fn text_color(&self) -> Rgb888 {
        self.text.to_rgb888()
    }

    pub fn background_color(&self) -> Rgb888 {
        self.background.to_rgb888()
    }
}
