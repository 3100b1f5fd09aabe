/*
 *  display/scroll.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Marquee offsets for text wider than its column
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

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use log::trace;

use crate::display::layout::Section;

/// Font used for every text field on the board
pub const TEXT_FONT: &MonoFont<'static> = &FONT_6X10;

/// Rendered width of `text` in pixels
pub fn text_width(text: &str) -> u32 {
    let advance = TEXT_FONT.character_size.width + TEXT_FONT.character_spacing;
    text.chars().count() as u32 * advance
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    LineName,
    Status,
}

/// Slot identity of a text field, not the train occupying the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollKey {
    pub section: Section,
    pub field: TextField,
}

impl ScrollKey {
    pub fn new(section: Section, field: TextField) -> Self {
        Self { section, field }
    }
}

impl fmt::Display for ScrollKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            TextField::LineName => "line_name",
            TextField::Status => "status",
        };
        write!(f, "{}_{}", field, self.section.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: u32,
    pub last_update: Instant,
    /// Fractional pixels not yet applied
    carry: f64,
}

impl ScrollState {
    fn at(now: Instant) -> Self {
        Self { offset: 0, last_update: now, carry: 0.0 }
    }
}

/// Per-field scroll table
///
/// Entries are created on first draw and live for the process; a field
/// whose text fits is pinned back to offset 0.
#[derive(Debug, Default)]
pub struct ScrollEngine {
    states: HashMap<ScrollKey, ScrollState>,
}

impl ScrollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leftward shift for `text` at `now`, 0 when it fits the viewport
    pub fn advance(
        &mut self,
        key: ScrollKey,
        text: &str,
        viewport_width: u32,
        speed_px_per_sec: f64,
        now: Instant,
    ) -> u32 {
        let width = text_width(text);
        if width <= viewport_width {
            self.reset(key, now);
            return 0;
        }

        let state = self.states.entry(key).or_insert_with(|| ScrollState::at(now));
        let dt = now.saturating_duration_since(state.last_update).as_secs_f64();
        let travel = speed_px_per_sec.max(0.0) * dt + state.carry;
        let step = travel.floor();

        state.carry = travel - step;
        state.offset = ((state.offset as u64 + step as u64) % width as u64) as u32;
        state.last_update = now;

        trace!("scroll {} -> {}px of {}px", key, state.offset, width);
        state.offset
    }

    /// Pin a field to offset 0 as of `now`
    pub fn reset(&mut self, key: ScrollKey, now: Instant) {
        self.states.insert(key, ScrollState::at(now));
    }

    pub fn offset(&self, key: ScrollKey) -> Option<u32> {
        self.states.get(&key).map(|s| s.offset)
    }

    pub fn state(&self, key: ScrollKey) -> Option<&ScrollState> {
        self.states.get(&key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
