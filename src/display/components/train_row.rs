/*
 *  display/components/train_row.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  One arrival row: indicator, letter, line name and status
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

use std::time::Instant;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};

use crate::display::color::LinePalette;
use crate::display::glyphs::{draw_glyph, draw_indicator, letter_glyph};
use crate::display::layout::{ComponentGeometry, LayoutConfig, Section, SectionBounds};
use crate::display::scroll::{ScrollEngine, ScrollKey, TextField, TEXT_FONT, text_width};
use crate::display::target::SurfaceTarget;
use crate::display::traits::PixelSurface;
use crate::trains::TrainArrival;

/// Unit labels pinned to the right edge of the status column, longest first
pub const UNIT_SUFFIXES: [&str; 2] = [" mins", " min"];

/// Split "12 mins" into ("12", " mins"); None for free-form statuses
pub fn split_unit_suffix(status: &str) -> Option<(&str, &'static str)> {
    UNIT_SUFFIXES
        .iter()
        .find_map(|&suffix| status.strip_suffix(suffix).map(|prefix| (prefix, suffix)))
}

/// Clip rectangle for a text column drawn on `baseline`
pub fn text_viewport(x: i32, width: u32, baseline: i32) -> Rectangle {
    let top = baseline - TEXT_FONT.baseline as i32;
    Rectangle::new(Point::new(x, top), Size::new(width, TEXT_FONT.character_size.height))
}

/// Draw `text` with its baseline at `origin`, nothing outside `clip`
pub fn draw_text<S>(surface: &mut S, text: &str, origin: Point, clip: &Rectangle, color: Rgb888)
where
    S: PixelSurface + ?Sized,
{
    if text.is_empty() {
        return;
    }
    let style = MonoTextStyle::new(TEXT_FONT, color);
    let mut target = SurfaceTarget::new(surface);
    let mut clipped = target.clipped(clip);
    // SurfaceTarget cannot fail
    let _ = Text::with_baseline(text, origin, style, Baseline::Alphabetic).draw(&mut clipped);
}

/// Row renderer for a single section
#[derive(Debug, Clone)]
pub struct TrainRow {
    layout: LayoutConfig,
    palette: LinePalette,
    speed_px_per_sec: f64,
}

impl TrainRow {
    pub fn new(layout: LayoutConfig, palette: LinePalette, speed_px_per_sec: f64) -> Self {
        Self { layout, palette, speed_px_per_sec }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn palette(&self) -> &LinePalette {
        &self.palette
    }

    /// Clear the section and draw `train` into it
    pub fn render<S>(
        &self,
        surface: &mut S,
        scroll: &mut ScrollEngine,
        section: Section,
        train: &TrainArrival,
        now: Instant,
    ) where
        S: PixelSurface + ?Sized,
    {
        let bounds = self.layout.section_bounds(section);
        let geom = self.layout.component_geometry(&bounds);

        surface.fill_rect(&bounds.rectangle(), self.palette.background_color());

        draw_indicator(
            surface,
            train.is_diamond(),
            geom.indicator_center,
            geom.indicator_radius,
            self.palette.line_color(train.line),
        );
        if let Some(glyph) = letter_glyph(train.line) {
            draw_glyph(surface, glyph, geom.letter_anchor, self.palette.text_color());
        }

        self.draw_field(
            surface,
            scroll,
            ScrollKey::new(section, TextField::LineName),
            train.line_name(),
            geom.line_name_x,
            geom.line_name_width,
            geom.text_baseline_y,
            now,
        );

        self.draw_status(surface, scroll, section, &bounds, &geom, &train.status, now);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_status<S>(
        &self,
        surface: &mut S,
        scroll: &mut ScrollEngine,
        section: Section,
        bounds: &SectionBounds,
        geom: &ComponentGeometry,
        status: &str,
        now: Instant,
    ) where
        S: PixelSurface + ?Sized,
    {
        let key = ScrollKey::new(section, TextField::Status);
        match split_unit_suffix(status) {
            Some((prefix, suffix)) => {
                scroll.reset(key, now);
                let color = self.palette.text_color();
                let baseline = geom.text_baseline_y;
                let suffix_x = geom.status_end_x - text_width(suffix) as i32;
                let prefix_x = suffix_x - text_width(prefix) as i32;
                // the count may run left of the column, keep it inside the row
                let clip = text_viewport(bounds.x, bounds.width, baseline);
                draw_text(surface, prefix, Point::new(prefix_x, baseline), &clip, color);
                draw_text(surface, suffix, Point::new(suffix_x, baseline), &clip, color);
            }
            None => self.draw_field(
                surface,
                scroll,
                key,
                status,
                geom.status_x,
                geom.status_width,
                geom.text_baseline_y,
                now,
            ),
        }
    }

    /// Static text if it fits the column, otherwise a looping marquee
    #[allow(clippy::too_many_arguments)]
    fn draw_field<S>(
        &self,
        surface: &mut S,
        scroll: &mut ScrollEngine,
        key: ScrollKey,
        text: &str,
        x: i32,
        width: u32,
        baseline: i32,
        now: Instant,
    ) where
        S: PixelSurface + ?Sized,
    {
        let color = self.palette.text_color();
        let clip = text_viewport(x, width, baseline);
        let offset = scroll.advance(key, text, width, self.speed_px_per_sec, now);
        let origin_x = x - offset as i32;

        draw_text(surface, text, Point::new(origin_x, baseline), &clip, color);

        let w = text_width(text);
        if w > width && origin_x + (w as i32) < x + width as i32 {
            draw_text(surface, text, Point::new(origin_x + w as i32, baseline), &clip, color);
        }
    }
}
