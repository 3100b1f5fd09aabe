/*
 *  display/glyphs.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Line indicators and the thick F/G letterforms
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
use embedded_graphics::prelude::Point;

use crate::display::traits::PixelSurface;
use crate::trains::Line;

/// Bitmap letter as filled half-open column spans per row
#[derive(Debug)]
pub struct Glyph {
    pub width: u32,
    pub rows: &'static [&'static [(u8, u8)]],
}

impl Glyph {
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Cell offsets of every filled pixel, row by row
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, spans)| {
            spans.iter().flat_map(move |&(start, end)| {
                (start..end).map(move |col| (col as i32, row as i32))
            })
        })
    }
}

// 2px stem in cols 1-2, top bar rows 0-1, mid bar rows 4-5
pub const GLYPH_F: Glyph = Glyph {
    width: 6,
    rows: &[
        &[(1, 6)],
        &[(1, 6)],
        &[(1, 3)],
        &[(1, 3)],
        &[(1, 5)],
        &[(1, 5)],
        &[(1, 3)],
        &[(1, 3)],
        &[(1, 3)],
    ],
};

// rounded corners on rows 0 and 8, spur opening on the right in rows 4-6
pub const GLYPH_G: Glyph = Glyph {
    width: 6,
    rows: &[
        &[(1, 6)],
        &[(0, 6)],
        &[(0, 2)],
        &[(0, 2)],
        &[(0, 2), (3, 6)],
        &[(0, 2), (3, 6)],
        &[(0, 2), (4, 6)],
        &[(0, 6)],
        &[(1, 6)],
    ],
};

/// Letter drawn inside the indicator, none for a placeholder row
pub fn letter_glyph(line: Line) -> Option<&'static Glyph> {
    match line {
        Line::F => Some(&GLYPH_F),
        Line::G => Some(&GLYPH_G),
        Line::Unknown => None,
    }
}

/// Offsets of a filled disc with the four axis tips removed.
///
/// Dropping (±r,0) and (0,±r) keeps small discs from growing single-pixel
/// nubs at the cardinal points.
pub fn circle_offsets(radius: i32) -> impl Iterator<Item = (i32, i32)> {
    let r2 = radius * radius;
    (-radius..=radius).flat_map(move |i| {
        (-radius..=radius).filter_map(move |j| {
            if i * i + j * j > r2 {
                return None;
            }
            if (i.abs() == radius && j == 0) || (j.abs() == radius && i == 0) {
                return None;
            }
            Some((i, j))
        })
    })
}

/// Offsets of a filled diamond, Manhattan distance <= r
pub fn diamond_offsets(radius: i32) -> impl Iterator<Item = (i32, i32)> {
    (-radius..=radius).flat_map(move |i| {
        (-radius..=radius).filter_map(move |j| {
            (i.abs() + j.abs() <= radius).then_some((i, j))
        })
    })
}

pub fn draw_circle<S>(surface: &mut S, center: Point, radius: i32, color: Rgb888)
where
    S: PixelSurface + ?Sized,
{
    for (dx, dy) in circle_offsets(radius) {
        surface.set_pixel(center.x + dx, center.y + dy, color);
    }
}

pub fn draw_diamond<S>(surface: &mut S, center: Point, radius: i32, color: Rgb888)
where
    S: PixelSurface + ?Sized,
{
    for (dx, dy) in diamond_offsets(radius) {
        surface.set_pixel(center.x + dx, center.y + dy, color);
    }
}

pub fn draw_glyph<S>(surface: &mut S, glyph: &Glyph, anchor: Point, color: Rgb888)
where
    S: PixelSurface + ?Sized,
{
    for (col, row) in glyph.pixels() {
        surface.set_pixel(anchor.x + col, anchor.y + row, color);
    }
}

pub fn draw_letter_f<S>(surface: &mut S, anchor: Point, color: Rgb888)
where
    S: PixelSurface + ?Sized,
{
    draw_glyph(surface, &GLYPH_F, anchor, color);
}

pub fn draw_letter_g<S>(surface: &mut S, anchor: Point, color: Rgb888)
where
    S: PixelSurface + ?Sized,
{
    draw_glyph(surface, &GLYPH_G, anchor, color);
}

/// Diamond for the express F, circle for everything else
pub fn draw_indicator<S>(surface: &mut S, diamond: bool, center: Point, radius: i32, color: Rgb888)
where
    S: PixelSurface + ?Sized,
{
    if diamond {
        draw_diamond(surface, center, radius, color);
    } else {
        draw_circle(surface, center, radius, color);
    }
}
