/*
 *  trains.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 *
 *  Train arrival records as consumed by the renderer
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

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::constants::{MAX_TRAINS, PLACEHOLDER_STATUS_LEN};

/// Rejections raised while turning upstream records into arrivals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainError {
    #[error("unknown line {0:?} (expected \"F\" or \"G\")")]
    UnknownLine(String),
}

/// Subway line served by the sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// 6 Av, local or Culver express
    F,
    /// Brooklyn-Queens Crosstown
    G,
    /// Degraded row substituted when the feed could not be read.
    /// Never produced by parsing, see [`TrainArrival::placeholder`].
    Unknown,
}

impl Line {
    /// Single-letter code as it appears upstream
    pub fn code(&self) -> &'static str {
        match self {
            Line::F => "F",
            Line::G => "G",
            Line::Unknown => "?",
        }
    }
}

impl TryFrom<&str> for Line {
    type Error = TrainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "F" | "f" => Ok(Line::F),
            "G" | "g" => Ok(Line::G),
            other => Err(TrainError::UnknownLine(other.to_string())),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Wire shape of one upstream element
#[derive(Debug, Deserialize)]
struct RawArrival {
    line: String,
    #[serde(default)]
    express: bool,
    #[serde(default)]
    status: String,
}

/// One upcoming train, immutable for the duration of a render call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawArrival")]
pub struct TrainArrival {
    pub line: Line,
    /// Only meaningful for the F
    pub express: bool,
    /// Usually "<N> mins", anything short otherwise
    pub status: String,
}

impl TryFrom<RawArrival> for TrainArrival {
    type Error = TrainError;

    fn try_from(raw: RawArrival) -> Result<Self, Self::Error> {
        Ok(Self {
            line: Line::try_from(raw.line.as_str())?,
            express: raw.express,
            status: raw.status,
        })
    }
}

impl TrainArrival {
    pub fn new(line: Line, express: bool, status: impl Into<String>) -> Self {
        Self { line, express, status: status.into() }
    }

    /// Degraded row used when the feed fails; status is cut to 20 characters.
    pub fn placeholder(status: &str) -> Self {
        Self {
            line: Line::Unknown,
            express: false,
            status: status.chars().take(PLACEHOLDER_STATUS_LEN).collect(),
        }
    }

    /// Display name of the service
    pub fn line_name(&self) -> &'static str {
        match (self.line, self.express) {
            (Line::F, true) => "6 Av - Culver Express",
            (Line::F, false) => "6 Av Local",
            (Line::G, _) => "Crosstown",
            (Line::Unknown, _) => "Unavailable",
        }
    }

    /// Express F trains get a diamond, everything else a circle
    pub fn is_diamond(&self) -> bool {
        self.line == Line::F && self.express
    }

    /// Leading whole minutes of the status, e.g. "12 mins" -> 12
    pub fn minutes(&self) -> Option<u32> {
        let digits: String = self
            .status
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

/// Order by minutes (unparseable last, otherwise stable) and keep the first two.
pub fn next_arrivals(mut arrivals: Vec<TrainArrival>) -> Vec<TrainArrival> {
    arrivals.sort_by_key(|t| t.minutes().unwrap_or(u32::MAX));
    arrivals.truncate(MAX_TRAINS);
    arrivals
}
