use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::constants::*;
use crate::display::color::{Color, LinePalette};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Effective configuration: defaults, then YAML, then CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    /// panel geometry & bring-up
    pub display: DisplayConfig,
    /// upstream arrivals endpoint
    pub feed: FeedConfig,
    /// marquee animation
    pub scroll: ScrollConfig,
    /// line colors
    pub colors: ColorsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// In-memory surface, logs frames instead of lighting panels
    #[default]
    Mock,
    /// HUB75 panels through rpi-rgb-led-matrix (feature `hardware`)
    #[value(name = "rgbmatrix")]
    #[serde(rename = "rgbmatrix")]
    RgbMatrix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub driver: DriverKind,
    pub panel_width: u32,
    pub panel_count: u32,
    pub height: u32,
    pub brightness: u8,       // 1-100
    pub gpio_slowdown: u32,
    pub hardware_mapping: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::Mock,
            panel_width: PANEL_WIDTH,
            panel_count: PANEL_COUNT,
            height: MATRIX_HEIGHT,
            brightness: DEFAULT_BRIGHTNESS,
            gpio_slowdown: DEFAULT_GPIO_SLOWDOWN,
            hardware_mapping: DEFAULT_HARDWARE_MAPPING.to_string(),
        }
    }
}

impl DisplayConfig {
    /// Width of the whole chain
    pub fn matrix_width(&self) -> u32 {
        self.panel_width * self.panel_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub interval_secs: u64,
    pub timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: FEED_URL.to_string(),
            interval_secs: POLL_INTERVAL_SECS,
            timeout_ms: FEED_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub speed_px_per_sec: f64,
    pub redraw_interval_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            speed_px_per_sec: SCROLL_SPEED_PX_PER_SEC,
            redraw_interval_ms: SCROLL_REDRAW_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub f_line: [u8; 3],
    pub g_line: [u8; 3],
}

impl Default for ColorsConfig {
    fn default() -> Self {
        let (fr, fg, fb) = F_TRAIN_COLOR;
        let (gr, gg, gb) = G_TRAIN_COLOR;
        Self { f_line: [fr, fg, fb], g_line: [gr, gg, gb] }
    }
}

impl ColorsConfig {
    pub fn palette(&self) -> LinePalette {
        LinePalette {
            f_line: Color::from(self.f_line),
            g_line: Color::from(self.g_line),
            ..LinePalette::default()
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "fgsign", about = "Next F/G arrivals on an RGB LED matrix", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Enable debug log level
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long, value_enum)]
    pub driver: Option<DriverKind>,
    #[arg(long)]
    pub brightness: Option<u8>,
    #[arg(long)]
    pub panel_count: Option<u32>,
    #[arg(long)]
    pub feed_url: Option<String>,
    #[arg(long)]
    pub interval_secs: Option<u64>,
    #[arg(long)]
    pub scroll_speed: Option<f64>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = dump_config(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Layer YAML and `cli` over the defaults and validate the result.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults + YAML file (explicit path or search); serde fills gaps
    let mut cfg = if let Some(p) = cli.config.as_ref() {
        if !p.exists() {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        read_yaml(p)?
    } else if let Some(p) = find_config_file() {
        read_yaml(&p)?
    } else {
        Config::default()
    };

    // 2) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 3) Validate
    validate(&cfg)?;
    Ok(cfg)
}

pub fn dump_config(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/fgsign/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/fgsign/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/fgsign.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["fgsign.yaml", "config.yaml", "config/fgsign.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    // an empty file is a valid, all-defaults config
    if s.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(s)?)
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()          { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                        { cfg.log_level = Some("debug".to_string()); }
    if let Some(d) = cli.driver         { cfg.display.driver = d; }
    if let Some(b) = cli.brightness     { cfg.display.brightness = b; }
    if let Some(n) = cli.panel_count    { cfg.display.panel_count = n; }
    if let Some(u) = cli.feed_url.as_ref() { cfg.feed.url = u.clone(); }
    if let Some(i) = cli.interval_secs  { cfg.feed.interval_secs = i; }
    if let Some(s) = cli.scroll_speed   { cfg.scroll.speed_px_per_sec = s; }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let display = &cfg.display;
    if display.panel_width == 0 || display.panel_count == 0 || display.height == 0 {
        return Err(ConfigError::Validation("display panel_width/panel_count/height must be > 0".into()));
    }
    let min_width = 2 * PADDING_X as u32 + INDICATOR_WIDTH + FIRST_GAP as u32 + LINE_NAME_WIDTH + SECOND_GAP as u32;
    if display.matrix_width() <= min_width {
        return Err(ConfigError::Validation(format!(
            "display is {}px wide, needs more than {}px for the fixed columns",
            display.matrix_width(), min_width
        )));
    }
    if display.brightness == 0 || display.brightness > 100 {
        return Err(ConfigError::Validation("display brightness must be 1..=100".into()));
    }
    if cfg.feed.url.trim().is_empty() {
        return Err(ConfigError::Validation("feed url must not be empty".into()));
    }
    if cfg.feed.interval_secs == 0 {
        return Err(ConfigError::Validation("feed interval_secs must be > 0".into()));
    }
    if cfg.scroll.redraw_interval_ms == 0 {
        return Err(ConfigError::Validation("scroll redraw_interval_ms must be > 0".into()));
    }
    if !cfg.scroll.speed_px_per_sec.is_finite() || cfg.scroll.speed_px_per_sec < 0.0 {
        return Err(ConfigError::Validation("scroll speed_px_per_sec must be >= 0".into()));
    }
    Ok(())
}
