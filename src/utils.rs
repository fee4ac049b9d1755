use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

use crate::types::{BrickSet, Part};

pub const PART_IMAGE_URL: &str = "https://www.lego.com/service/bricks/5/2";
pub const SET_IMAGE_URL: &str = "https://images.brickset.com/sets/images";

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns the current time in milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generates an identifier unique within the running process.
///
/// Combines the current timestamp, a process-wide counter and a short random
/// suffix, e.g. `part-1729340000000-17-k3Fq9a`.
pub fn generate_id(prefix: &str) -> String {
    let count = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("{prefix}-{}-{count}-{suffix}", now_millis())
}

pub fn part_image_url(element_id: &str) -> String {
    format!("{PART_IMAGE_URL}/{element_id}")
}

pub fn set_image_url(set_number: &str) -> String {
    format!("{SET_IMAGE_URL}/{set_number}-1.jpg")
}

/// Resolves a user supplied reference to a set id.
///
/// Tries the set id, then the catalog number (newest entry first, as sets are
/// kept newest-first), then a 1-based position in the list.
pub fn resolve_set_id(sets: &[BrickSet], reference: &str) -> Option<String> {
    let reference = reference.trim();
    if let Some(set) = sets
        .iter()
        .find(|s| s.id == reference)
        .or_else(|| sets.iter().find(|s| s.number == reference))
    {
        return Some(set.id.clone());
    }
    position(reference)
        .and_then(|idx| sets.get(idx))
        .map(|s| s.id.clone())
}

/// Same as [`resolve_set_id`], for parts of one set.
pub fn resolve_part_id(parts: &[Part], reference: &str) -> Option<String> {
    if let Some(part) = parts.iter().find(|p| p.id == reference) {
        return Some(part.id.clone());
    }
    position(reference)
        .and_then(|idx| parts.get(idx))
        .map(|p| p.id.clone())
}

fn position(reference: &str) -> Option<usize> {
    match reference.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n - 1),
        _ => None,
    }
}

pub fn progress_bar_text(collected: u64, required: u64, width: usize) -> String {
    if required == 0 {
        return "-".repeat(width);
    }
    let filled = ((collected.min(required) * width as u64) / required) as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
