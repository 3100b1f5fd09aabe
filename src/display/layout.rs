/*
 *  display/layout.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed row layout for the two-row arrivals board
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

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::display::traits::SurfaceCapabilities;

/// Layout constants for the board
///
/// Every column width is fixed here, never measured from content, so the
/// indicator, line name and status columns line up on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Matrix width in pixels
    pub width: u32,

    /// Matrix height in pixels
    pub height: u32,

    /// Left/right padding
    pub padding_x: i32,

    /// Padding above the top row
    pub padding_y: i32,

    /// Gap between the two rows
    pub center_gap: i32,

    /// Row height
    pub row_height: u32,

    /// Indicator diameter
    pub indicator_width: u32,

    /// Gap after the indicator
    pub first_gap: i32,

    /// Line name column width
    pub line_name_width: u32,

    /// Gap between line name and status
    pub second_gap: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: MATRIX_WIDTH,
            height: MATRIX_HEIGHT,
            padding_x: PADDING_X,
            padding_y: PADDING_Y,
            center_gap: CENTER_GAP,
            row_height: ROW_HEIGHT,
            indicator_width: INDICATOR_WIDTH,
            first_gap: FIRST_GAP,
            line_name_width: LINE_NAME_WIDTH,
            second_gap: SECOND_GAP,
        }
    }
}

/// Row slot on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Top,
    Bottom,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Top, Section::Bottom];

    pub fn index(&self) -> usize {
        match self {
            Section::Top => 0,
            Section::Bottom => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Section> {
        match index {
            0 => Some(Section::Top),
            1 => Some(Section::Bottom),
            _ => None,
        }
    }
}

/// Pixel rectangle of one row slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl SectionBounds {
    /// Inclusive right edge
    pub fn end_x(&self) -> i32 {
        self.x + self.width as i32 - 1
    }

    /// Inclusive bottom edge
    pub fn end_y(&self) -> i32 {
        self.y + self.height as i32 - 1
    }

    pub fn rectangle(&self) -> Rectangle {
        Rectangle::new(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }
}

/// Derived coordinates of every element in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentGeometry {
    pub indicator_center: Point,
    pub indicator_radius: i32,
    /// Top-left of the 6x9 letter cell
    pub letter_anchor: Point,
    pub line_name_x: i32,
    pub line_name_width: u32,
    pub status_x: i32,
    pub status_width: u32,
    pub status_end_x: i32,
    pub text_baseline_y: i32,
}

impl LayoutConfig {
    /// Default layout stretched to the surface dimensions
    pub fn for_surface(caps: &SurfaceCapabilities) -> Self {
        Self {
            width: caps.width,
            height: caps.height,
            ..Self::default()
        }
    }

    /// Width left for the status column once the fixed columns are placed
    pub fn status_width(&self) -> u32 {
        let fixed = 2 * self.padding_x
            + self.indicator_width as i32
            + self.first_gap
            + self.line_name_width as i32
            + self.second_gap;
        (self.width as i32 - fixed).max(0) as u32
    }

    /// Check the layout fits the matrix
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("matrix width/height must be > 0".into());
        }
        if self.status_width() == 0 {
            return Err(format!(
                "matrix width {} leaves no room for the status column",
                self.width
            ));
        }
        let bottom = self.section_bounds(Section::Bottom);
        if bottom.end_y() >= self.height as i32 {
            return Err(format!(
                "two rows of {}px do not fit a {}px tall matrix",
                self.row_height, self.height
            ));
        }
        if self.indicator_width < LETTER_WIDTH {
            return Err("indicator narrower than the letter cell".into());
        }
        Ok(())
    }

    /// Bounds for a row slot
    pub fn section_bounds(&self, section: Section) -> SectionBounds {
        let y = match section {
            Section::Top => self.padding_y,
            Section::Bottom => self.padding_y + self.row_height as i32 + self.center_gap,
        };
        SectionBounds {
            x: self.padding_x,
            y,
            width: (self.width as i32 - self.padding_x * 2).max(0) as u32,
            height: self.row_height,
        }
    }

    /// Element coordinates for a row, fixed offsets from the section origin
    pub fn component_geometry(&self, bounds: &SectionBounds) -> ComponentGeometry {
        let (x, y) = (bounds.x, bounds.y);
        let indicator = self.indicator_width as i32;
        let height = bounds.height as i32;

        let line_name_x = x + indicator + self.first_gap - 1;
        let status_x = line_name_x + self.line_name_width as i32 + self.second_gap - 1;
        let status_width = self.status_width();

        ComponentGeometry {
            indicator_center: Point::new(x + indicator / 2, y + height / 2),
            indicator_radius: indicator / 2,
            letter_anchor: Point::new(
                x + (indicator - LETTER_WIDTH as i32) / 2,
                y + (height - (LETTER_HEIGHT as i32 - 1)) / 2,
            ),
            line_name_x,
            line_name_width: self.line_name_width,
            status_x,
            status_width,
            status_end_x: status_x + status_width as i32,
            text_baseline_y: y + TEXT_BASELINE_OFFSET,
        }
    }
}
