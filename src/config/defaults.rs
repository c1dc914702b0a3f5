//! Default value functions for serde deserialization.

use crate::frame::MAX_DECOMPRESSED_SIZE;
use crate::io::{DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH};

pub fn max_decompressed_size() -> usize {
    MAX_DECOMPRESSED_SIZE
}

pub fn enabled() -> bool {
    true
}

pub fn min_border_cells() -> usize {
    100
}

pub fn window_size() -> usize {
    10
}

pub fn max_seed_attempts() -> usize {
    1000
}

pub fn fill_tolerance() -> u8 {
    5
}

pub fn output_dir() -> String {
    "./maps".to_string()
}

pub fn map_name() -> String {
    "hackerbot_map".to_string()
}

pub fn occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

pub fn free_thresh() -> f32 {
    DEFAULT_FREE_THRESH
}

pub fn unit_scale() -> f32 {
    1.0
}

pub fn port() -> String {
    "/dev/ttyACM0".to_string()
}

pub fn baud_rate() -> u32 {
    230400
}

pub fn command_timeout_ms() -> u64 {
    2000
}

pub fn download_timeout_ms() -> u64 {
    10000
}

pub fn idle_gap_ms() -> u64 {
    500
}
