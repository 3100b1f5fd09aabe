/*
 *  tests/display_integration.rs
 *
 *  Whole-frame rendering against the in-memory surface
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 */

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::Point;

use fgsign::display::components::{draw_text, text_viewport};
use fgsign::display::drivers::mock::MockSurfaceState;
use fgsign::display::{FrameBuffer, FrameRenderer, LinePalette, MockSurface, SurfaceOp};
use fgsign::trains::{Line, TrainArrival};

const ORANGE: Rgb888 = Rgb888::new(255, 99, 25);
const GREEN: Rgb888 = Rgb888::new(108, 190, 69);

fn renderer() -> (FrameRenderer, Arc<Mutex<MockSurfaceState>>) {
    let surface = MockSurface::new_with_size(128, 32).with_recording();
    let state = surface.state();
    let r = FrameRenderer::new(Box::new(surface), LinePalette::default(), 2.0, 250).unwrap();
    (r, state)
}

fn last_frame(state: &Arc<Mutex<MockSurfaceState>>) -> FrameBuffer {
    state.lock().unwrap().last_frame.clone().expect("no frame flushed")
}

fn take_ops(state: &Arc<Mutex<MockSurfaceState>>) -> Vec<SurfaceOp> {
    std::mem::take(&mut state.lock().unwrap().ops)
}

fn lit(frame: &FrameBuffer, x: i32, y: i32) -> bool {
    frame.get(x, y).is_some_and(|c| c != Rgb888::BLACK)
}

fn any_lit(frame: &FrameBuffer, xs: std::ops::Range<i32>, ys: std::ops::Range<i32>) -> bool {
    ys.clone().any(|y| xs.clone().any(|x| lit(frame, x, y)))
}

fn rightmost_lit(frame: &FrameBuffer, ys: std::ops::Range<i32>) -> Option<i32> {
    (0..frame.width() as i32).rev().find(|&x| ys.clone().any(|y| lit(frame, x, y)))
}

/// `text` drawn alone into the name column of a blank panel
fn reference_name(text: &str, baseline: i32) -> FrameBuffer {
    let mut surface = MockSurface::new_with_size(128, 32);
    let clip = text_viewport(14, 72, baseline);
    draw_text(&mut surface, text, Point::new(14, baseline), &clip, Rgb888::WHITE);
    surface.framebuffer().clone()
}

fn assert_region_eq(frame: &FrameBuffer, expected: &FrameBuffer, xs: std::ops::Range<i32>, ys: std::ops::Range<i32>) {
    for y in ys {
        for x in xs.clone() {
            assert_eq!(frame.get(x, y), expected.get(x, y), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_two_trains_fill_both_rows() {
    let (mut r, state) = renderer();
    r.render_frame(&[
        TrainArrival::new(Line::F, false, "3 mins"),
        TrainArrival::new(Line::G, false, "12 mins"),
    ])
    .unwrap();
    let frame = last_frame(&state);

    // F local: orange circle with a white letter, no cardinal tip
    assert_eq!(frame.get(4, 6), Some(ORANGE));
    assert_eq!(frame.get(7, 9), Some(Rgb888::WHITE));
    assert_eq!(frame.get(12, 9), Some(Rgb888::BLACK));
    assert_eq!(frame.get(7, 4), Some(Rgb888::BLACK));

    // G: green circle in the bottom row, clear of the letter cell
    assert_eq!(frame.get(11, 20), Some(GREEN));
    assert_eq!(frame.get(4, 20), Some(Rgb888::WHITE));
    assert_eq!(frame.get(12, 23), Some(Rgb888::BLACK));

    // line names drawn static from the start of the name column
    assert_region_eq(&frame, &reference_name("6 Av Local", 13), 14..86, 6..16);
    // bottom status count starts at x=82
    assert_region_eq(&frame, &reference_name("Crosstown", 27), 14..82, 20..30);
    let top_name = rightmost_lit(&reference_name("6 Av Local", 13), 6..16).unwrap();
    let bottom_name = rightmost_lit(&reference_name("Crosstown", 27), 20..30).unwrap();
    assert!((68..74).contains(&top_name), "60px name ends at {}", top_name);
    assert!((62..68).contains(&bottom_name), "54px name ends at {}", bottom_name);

    // statuses pinned to the right edge of the status column
    let top_end = rightmost_lit(&frame, 6..16).unwrap();
    let bottom_end = rightmost_lit(&frame, 20..30).unwrap();
    assert!((118..124).contains(&top_end), "top status ends at {}", top_end);
    assert!((118..124).contains(&bottom_end), "bottom status ends at {}", bottom_end);

    // "12" sits left of " mins"
    assert!(any_lit(&frame, 82..94, 20..30));

    // padding and the centre gap stay dark
    assert!(!any_lit(&frame, 0..128, 0..4));
    assert!(!any_lit(&frame, 0..128, 16..18));
    assert!(!any_lit(&frame, 0..128, 30..32));
    assert!(!any_lit(&frame, 0..2, 0..32));
    assert!(!any_lit(&frame, 126..128, 0..32));
}

#[test]
fn test_single_express_leaves_bottom_row_dark() {
    let (mut r, state) = renderer();
    r.render_frame(&[TrainArrival::new(Line::F, true, "1 min")]).unwrap();
    let frame = last_frame(&state);

    // diamond: tips lit, corners dark
    assert_eq!(frame.get(12, 9), Some(ORANGE));
    assert_eq!(frame.get(7, 4), Some(ORANGE));
    assert_eq!(frame.get(4, 6), Some(Rgb888::BLACK));

    assert!(!any_lit(&frame, 0..128, 16..32));

    let ops = take_ops(&state);
    assert_eq!(ops.iter().filter(|op| matches!(op, SurfaceOp::FillRect { .. })).count(), 1);
}

#[test]
fn test_empty_input_clears_everything() {
    let (mut r, state) = renderer();
    r.render_frame(&[TrainArrival::new(Line::G, false, "5 mins")]).unwrap();
    take_ops(&state);

    r.render_frame(&[]).unwrap();
    assert_eq!(take_ops(&state), vec![SurfaceOp::Clear]);
    assert_eq!(last_frame(&state).count_lit(), 0);
    assert_eq!(state.lock().unwrap().flush_count, 2);
}

#[test]
fn test_extra_trains_ignored() {
    let two = [
        TrainArrival::new(Line::F, false, "3 mins"),
        TrainArrival::new(Line::G, false, "12 mins"),
    ];
    let mut three = two.to_vec();
    three.push(TrainArrival::new(Line::F, true, "20 mins"));

    let now = Instant::now();
    let (mut a, state_a) = renderer();
    let (mut b, state_b) = renderer();
    a.render_frame_at(&two, now).unwrap();
    b.render_frame_at(&three, now).unwrap();
    assert_eq!(take_ops(&state_a), take_ops(&state_b));
}

#[test]
fn test_frozen_clock_is_deterministic() {
    let trains = [
        TrainArrival::new(Line::F, true, "Delayed"),
        TrainArrival::new(Line::G, false, "7 mins"),
    ];
    let t0 = Instant::now();
    let (mut r, state) = renderer();

    r.render_frame_at(&trains, t0).unwrap();
    r.render_frame_at(&trains, t0 + Duration::from_secs(3)).unwrap();
    let first = take_ops(&state);
    r.render_frame_at(&trains, t0 + Duration::from_secs(3)).unwrap();
    let second = take_ops(&state);

    // second call replays only the last frame of the first pair
    assert_eq!(&first[first.len() - second.len()..], &second[..]);

    // a fresh renderer fed the same clock produces the same calls
    let (mut other, other_state) = renderer();
    other.render_frame_at(&trains, t0).unwrap();
    other.render_frame_at(&trains, t0 + Duration::from_secs(3)).unwrap();
    assert_eq!(take_ops(&other_state), first);
}

#[test]
fn test_marquee_moves_with_time() {
    let trains = [TrainArrival::new(Line::F, true, "4 mins")];
    let t0 = Instant::now();
    let (mut r, state) = renderer();

    r.render_frame_at(&trains, t0).unwrap();
    let before = last_frame(&state);
    r.render_frame_at(&trains, t0 + Duration::from_secs(5)).unwrap();
    let after = last_frame(&state);

    assert_ne!(before, after);
    // indicator and status untouched by the marquee
    for y in 4..16 {
        for x in (0..14).chain(86..128) {
            assert_eq!(before.get(x, y), after.get(x, y), "({}, {})", x, y);
        }
    }
}

#[test]
fn test_placeholder_rows() {
    let (mut r, state) = renderer();
    let rows = vec![TrainArrival::placeholder("Bad response"); 2];
    r.render_frame(&rows).unwrap();
    let frame = last_frame(&state);

    let gray = Rgb888::new(128, 128, 128);
    // no letter inside the indicator
    assert_eq!(frame.get(7, 9), Some(gray));
    assert_eq!(frame.get(7, 23), Some(gray));
}

#[tokio::test]
async fn test_shared_renderer_serializes_frames() {
    let (r, state) = renderer();
    let shared = r.into_shared();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            let mut guard = shared.lock().await;
            guard.render_frame(&[TrainArrival::new(Line::G, false, "5 mins")])
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    let state = state.lock().unwrap();
    assert_eq!(state.flush_count, 4);
    assert_eq!(state.clear_count, 4);
    // every frame starts with a full clear: frames never interleave
    let clears: Vec<usize> = state
        .ops
        .iter()
        .enumerate()
        .filter(|(_, op)| matches!(op, SurfaceOp::Clear))
        .map(|(i, _)| i)
        .collect();
    let per_frame = state.ops.len() / 4;
    assert_eq!(clears, vec![0, per_frame, 2 * per_frame, 3 * per_frame]);
}
