//! Plots when you post on Discord. Reads the personal data archive Discord hands out, moves every
//! message timestamp into your own timezone and draws the date against the time of day.
//!

pub mod archive;
pub mod cli;
pub mod plot;
pub mod timeline;
pub mod utils;
