/*
 *  lib.rs
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
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

//! Next-train sign for two chained 64x32 RGB LED panels.
//!
//! `feed` polls the upstream arrivals service, `trains` models the records,
//! and `display` turns up to two of them into pixels on a [`display::PixelSurface`].

pub mod config;
pub mod constants;
pub mod display;
pub mod feed;
pub mod trains;
