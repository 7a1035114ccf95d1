//! Display strings and icon paths for the game detail panel.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ColorMapping;
use crate::games::SystemInfo;

pub const NO_DESCRIPTION: &str =
    "No description available, use game scraper to get proper information...";
pub const UNKNOWN_DEVELOPER: &str = "Unknown developer";
pub const UNKNOWN_GENRE: &str = "Unknown genre";
pub const UNKNOWN_RELEASE_YEAR: &str = "Unknown release year";
pub const NEVER_PLAYED: &str = "Never played";

const FALLBACK_COLOR: &str = "#000000";
const MAX_GENRE_LENGTH: usize = 20;
const CHAR_WIDTH_FACTOR: f64 = 0.65;

const PLAYERS_ICON: &str = "assets/icons/players.png";
const STAR_FULL: &str = "assets/icons/star1.png";
const STAR_HALF: &str = "assets/icons/star05.png";
const STAR_EMPTY: &str = "assets/icons/star0.png";
const STAR_COUNT: usize = 5;
const BATTERY_CHARGING: &str = "assets/icons/charging.png";

/// Upper bound in percent (inclusive) and icon for each battery level.
const BATTERY_LEVELS: [(f64, &str); 5] = [
    (20.0, "assets/icons/10.png"),
    (40.0, "assets/icons/25.png"),
    (60.0, "assets/icons/50.png"),
    (80.0, "assets/icons/75.png"),
    (90.0, "assets/icons/90.png"),
];
const BATTERY_FULL: &str = "assets/icons/95.png";

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

pub fn color_for_system<'a>(colors: &'a ColorMapping, system: &str) -> &'a str {
    colors
        .get(system)
        .or_else(|| colors.get("default"))
        .map(String::as_str)
        .unwrap_or(FALLBACK_COLOR)
}

pub fn system_metadata<'a>(systems: &'a [SystemInfo], short_name: &str) -> Option<&'a SystemInfo> {
    systems.iter().find(|s| s.short_name == short_name)
}

pub fn format_description(description: &str) -> &str {
    non_blank_or(description, NO_DESCRIPTION)
}

pub fn format_developer(developer: &str) -> &str {
    non_blank_or(developer, UNKNOWN_DEVELOPER)
}

/// First genre of a `/`, `,` or `-` separated list, truncated for the badge.
pub fn format_genre(genre: &str) -> String {
    if genre.trim().is_empty() {
        return UNKNOWN_GENRE.to_string();
    }

    let first = genre
        .split(['/', ',', '-'])
        .next()
        .unwrap_or_default()
        .trim();

    if first.chars().count() <= MAX_GENRE_LENGTH {
        first.to_string()
    } else {
        let truncated: String = first.chars().take(MAX_GENRE_LENGTH - 3).collect();
        format!("{}...", truncated)
    }
}

fn non_blank_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayersBadge {
    pub count: u32,
    pub icon: &'static str,
}

/// Badge for multiplayer games; single-player games get none.
pub fn players_badge(players: u32) -> Option<PlayersBadge> {
    (players > 1).then_some(PlayersBadge {
        count: players,
        icon: PLAYERS_ICON,
    })
}

pub fn release_year_text(year: Option<u32>) -> String {
    match year {
        Some(year) if year != 0 => year.to_string(),
        _ => UNKNOWN_RELEASE_YEAR.to_string(),
    }
}

/// Five star icons for a rating fraction, with at most one half star.
pub fn rating_icons(rating: f64) -> Vec<&'static str> {
    let rating = if rating.is_nan() { 0.0 } else { rating.clamp(0.0, 1.0) };
    let scaled = rating * STAR_COUNT as f64;
    let full = scaled.floor() as usize;
    let half = scaled.fract() != 0.0;

    let mut icons = vec![STAR_FULL; full];
    if half {
        icons.push(STAR_HALF);
    }
    icons.resize(STAR_COUNT, STAR_EMPTY);
    icons
}

pub fn rating_display(rating: f64) -> String {
    rating_icons(rating).join(" ")
}

pub fn battery_icon(fraction: f64, charging: bool) -> &'static str {
    if fraction.is_nan() || charging {
        return BATTERY_CHARGING;
    }

    let percent = fraction * 100.0;
    BATTERY_LEVELS
        .iter()
        .find(|(limit, _)| percent <= *limit)
        .map(|(_, icon)| *icon)
        .unwrap_or(BATTERY_FULL)
}

/// Humanized "last played" label relative to `now`.
///
/// Dates older than four weeks are rendered with `date_format` (a chrono
/// strftime pattern).
pub fn format_last_played(
    last_played: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    date_format: &str,
) -> String {
    let Some(played) = last_played.filter(|at| at.timestamp() != 0) else {
        return NEVER_PLAYED.to_string();
    };

    let days = (now - played).num_days().max(0);

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => {
            let weeks = days / 7;
            format!("{} week{} ago", weeks, if weeks == 1 { "" } else { "s" })
        }
        _ => {
            let mut date = String::new();
            if write!(date, "{}", played.format(date_format)).is_err() {
                log::debug!("Invalid date format '{}', using ISO date", date_format);
                return played.format("%Y-%m-%d").to_string();
            }
            date
        }
    }
}

/// Rough rendered width of a label that may contain markup tags.
pub fn approximate_text_width(text: &str, pixel_size: f64) -> f64 {
    let plain = MARKUP_TAG.replace_all(text, "");
    plain.chars().count() as f64 * pixel_size * CHAR_WIDTH_FACTOR
}
