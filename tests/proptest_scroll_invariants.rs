//! Property-based invariant tests for scrolling and row geometry.
//!
//! These tests verify invariants that must hold for any valid inputs:
//!
//! 1. Text that fits its viewport never scrolls.
//! 2. A single advance from a fresh slot is floor(speed * dt) mod text width.
//! 3. The offset always stays below the text width.
//! 4. Small ticks accumulate to the same travel as one long tick (within a pixel).
//! 4a. With a fractional remainder pending, an advance is at most one pixel
//!     ahead of (offset0 + floor(speed * dt)) mod width, never behind.
//! 5. Row sections never overlap and are separated by exactly the centre gap.
//! 6. Component geometry is a pure function of the section bounds.
//! 7. The status column never runs past the section edge.
//! 8. Circle indicators are the filled disc minus four cardinal tips.
//! 9. Diamond indicators hold 2r^2 + 2r + 1 pixels.

use std::time::{Duration, Instant};

use fgsign::display::glyphs::{circle_offsets, diamond_offsets};
use fgsign::display::{LayoutConfig, ScrollEngine, ScrollKey, Section, TextField, text_width};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn key_strategy() -> impl Strategy<Value = ScrollKey> {
    (0usize..2, any::<bool>()).prop_map(|(i, status)| {
        let section = Section::from_index(i).unwrap_or(Section::Top);
        let field = if status { TextField::Status } else { TextField::LineName };
        ScrollKey::new(section, field)
    })
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 -]{1,40}"
}

fn speed_strategy() -> impl Strategy<Value = f64> {
    (0u32..=400).prop_map(|tenths| tenths as f64 / 10.0)
}

fn disc_count(r: i32) -> usize {
    let mut n = 0;
    for i in -r..=r {
        for j in -r..=r {
            if i * i + j * j <= r * r {
                n += 1;
            }
        }
    }
    n
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Fitting text never scrolls
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fitting_text_stays_put(
        key in key_strategy(),
        text in text_strategy(),
        speed in speed_strategy(),
        ms in 0u64..600_000,
    ) {
        let viewport = text_width(&text) + 1;
        let t0 = Instant::now();
        let mut engine = ScrollEngine::new();
        prop_assert_eq!(engine.advance(key, &text, viewport, speed, t0), 0);
        let offset = engine.advance(key, &text, viewport, speed, t0 + Duration::from_millis(ms));
        prop_assert_eq!(offset, 0, "text {:?} fits {}px", text, viewport);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Single advance from a fresh slot
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_advance_matches_formula(
        key in key_strategy(),
        text in text_strategy(),
        speed in speed_strategy(),
        ms in 0u64..600_000,
    ) {
        let width = text_width(&text);
        let viewport = width.saturating_sub(1);
        prop_assume!(viewport > 0);

        let t0 = Instant::now();
        let dt = Duration::from_millis(ms);
        let mut engine = ScrollEngine::new();
        prop_assert_eq!(engine.advance(key, &text, viewport, speed, t0), 0);

        let offset = engine.advance(key, &text, viewport, speed, t0 + dt);
        let expected = ((speed * dt.as_secs_f64()).floor() as u64 % width as u64) as u32;
        prop_assert_eq!(offset, expected);
        prop_assert!(offset < width, "offset {} >= width {}", offset, width);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Ticks accumulate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ticks_accumulate(
        speed in speed_strategy(),
        tick_ms in 10u64..500,
        ticks in 1u32..50,
    ) {
        // wide enough that the total travel never wraps
        let text = "x".repeat(400);
        let key = ScrollKey::new(Section::Top, TextField::LineName);
        let t0 = Instant::now();
        let mut engine = ScrollEngine::new();
        engine.advance(key, &text, 72, speed, t0);

        let mut offset = 0;
        for n in 1..=ticks {
            offset = engine.advance(key, &text, 72, speed, t0 + Duration::from_millis(tick_ms * n as u64));
        }

        let total = Duration::from_millis(tick_ms * ticks as u64).as_secs_f64();
        let expected = (speed * total).floor() as u32;
        prop_assert!(
            offset.abs_diff(expected) <= 1,
            "offset {} after {} ticks, expected ~{}", offset, ticks, expected
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4a. Pending remainder
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn carry_leads_by_at_most_one_pixel(
        key in key_strategy(),
        text in text_strategy(),
        speed in speed_strategy(),
        first_ms in 1u64..2_000,
        ms in 0u64..600_000,
    ) {
        let width = text_width(&text);
        let viewport = width.saturating_sub(1);
        prop_assume!(viewport > 0);

        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(first_ms);
        let dt = Duration::from_millis(ms);
        let mut engine = ScrollEngine::new();
        engine.advance(key, &text, viewport, speed, t0);
        // leaves a remainder whenever speed * first_ms is not whole
        let offset0 = engine.advance(key, &text, viewport, speed, t1);

        let offset = engine.advance(key, &text, viewport, speed, t1 + dt);
        let base = (offset0 as u64 + (speed * dt.as_secs_f64()).floor() as u64) % width as u64;
        let lead = (offset as u64 + width as u64 - base) % width as u64;
        prop_assert!(lead <= 1,
            "offset {} vs formula {} (offset0 {}, width {})", offset, base, offset0, width);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-7. Row geometry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sections_disjoint_with_exact_gap(width in 101u32..=512) {
        let layout = LayoutConfig { width, ..LayoutConfig::default() };
        prop_assert!(layout.validate().is_ok());

        let top = layout.section_bounds(Section::Top);
        let bottom = layout.section_bounds(Section::Bottom);
        prop_assert!(top.rectangle().intersection(&bottom.rectangle()).is_zero_sized());
        prop_assert_eq!(bottom.y - (top.end_y() + 1), layout.center_gap);
    }

    #[test]
    fn geometry_is_idempotent(width in 101u32..=512, bottom in any::<bool>()) {
        let layout = LayoutConfig { width, ..LayoutConfig::default() };
        let section = if bottom { Section::Bottom } else { Section::Top };
        let bounds = layout.section_bounds(section);
        prop_assert_eq!(layout.component_geometry(&bounds), layout.component_geometry(&bounds));
    }

    #[test]
    fn status_stays_in_section(width in 101u32..=512) {
        let layout = LayoutConfig { width, ..LayoutConfig::default() };
        for section in Section::ALL {
            let bounds = layout.section_bounds(section);
            let g = layout.component_geometry(&bounds);
            prop_assert!(g.status_width > 0);
            prop_assert!(g.status_end_x <= bounds.end_x() + 1,
                "status ends at {} past section edge {}", g.status_end_x, bounds.end_x());
            prop_assert!(g.line_name_x + g.line_name_width as i32 <= g.status_x);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8-9. Indicator shapes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn circle_is_disc_minus_tips(r in 1i32..20) {
        let offsets: Vec<_> = circle_offsets(r).collect();
        prop_assert_eq!(offsets.len(), disc_count(r) - 4);
        prop_assert!(!offsets.contains(&(r, 0)));
        prop_assert!(!offsets.contains(&(0, -r)));
        prop_assert!(offsets.contains(&(0, 0)));
    }

    #[test]
    fn diamond_pixel_count(r in 0i32..20) {
        let n = diamond_offsets(r).count() as i32;
        prop_assert_eq!(n, 2 * r * r + 2 * r + 1);
    }
}
