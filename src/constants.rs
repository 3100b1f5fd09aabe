//! This module contains global constants used across the display and feed modules.

/// Width of a single 64x32 panel in pixels.
pub const PANEL_WIDTH: u32 = 64;
/// Number of panels chained horizontally.
pub const PANEL_COUNT: u32 = 2;
/// The total width of the chained matrix in pixels.
pub const MATRIX_WIDTH: u32 = PANEL_WIDTH * PANEL_COUNT;
/// The total height of the matrix in pixels.
pub const MATRIX_HEIGHT: u32 = 32;

/// Horizontal padding on both sides of each row.
pub const PADDING_X: i32 = 2;
/// Padding above the first row.
pub const PADDING_Y: i32 = 4;
/// Vertical gap between the two rows.
pub const CENTER_GAP: i32 = 4;
/// Height of one train row.
pub const ROW_HEIGHT: u32 = 10;

// row component measurements, left to right
/// Diameter of the circle/diamond line indicator.
pub const INDICATOR_WIDTH: u32 = 10;
/// Gap between the indicator and the line name.
pub const FIRST_GAP: i32 = 3;
/// Fixed column width for the line name.
pub const LINE_NAME_WIDTH: u32 = 72;
/// Gap between the line name and the status column.
pub const SECOND_GAP: i32 = 11;
// status column takes what is left: 128 - (2 + 10 + 3 + 72 + 11 + 2) = 28px

/// Bitmap letter cell width.
pub const LETTER_WIDTH: u32 = 6;
/// Bitmap letter cell height.
pub const LETTER_HEIGHT: u32 = 9;
/// Offset from the row top to the text baseline.
pub const TEXT_BASELINE_OFFSET: i32 = 9;

/// Marquee speed in pixels per second.
pub const SCROLL_SPEED_PX_PER_SEC: f64 = 2.0;
/// How often the last frame is redrawn so marquees move between polls.
pub const SCROLL_REDRAW_INTERVAL_MS: u64 = 250;

/// Seconds between upstream polls.
pub const POLL_INTERVAL_SECS: u64 = 15;
/// Upstream request timeout.
pub const FEED_TIMEOUT_MS: u64 = 5_000;
/// Default upstream endpoint.
pub const FEED_URL: &str = "http://mother.local:4599/trains/fg-northbound-next";

/// Trains shown per frame, one per row.
pub const MAX_TRAINS: usize = 2;
/// Longest error text carried into a placeholder row.
pub const PLACEHOLDER_STATUS_LEN: usize = 20;

// MTA trunk line colors
pub const F_TRAIN_COLOR: (u8, u8, u8) = (255, 99, 25);
pub const G_TRAIN_COLOR: (u8, u8, u8) = (108, 190, 69);
pub const UNKNOWN_LINE_COLOR: (u8, u8, u8) = (128, 128, 128);
pub const TEXT_COLOR: (u8, u8, u8) = (255, 255, 255);

// panel bring-up defaults for the Adafruit RGB matrix bonnet
pub const DEFAULT_BRIGHTNESS: u8 = 50;
pub const DEFAULT_GPIO_SLOWDOWN: u32 = 4;
pub const DEFAULT_HARDWARE_MAPPING: &str = "adafruit-hat";
