// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print one value, rendering it with `text` in text mode
pub fn print<T: Serialize + ?Sized>(value: &T, format: OutputFormat, text: impl FnOnce(&T) -> String) {
    match format {
        OutputFormat::Text => println!("{}", text(value)),
        OutputFormat::Json => print_json(value),
    }
}

/// Print a list as a table in text mode, or as a JSON array
pub fn print_list<T: Serialize>(
    items: &[T],
    format: OutputFormat,
    empty: &str,
    header: &str,
    row: impl Fn(&T) -> String,
) {
    match format {
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", empty);
                return;
            }
            println!("{}", header);
            for item in items {
                println!("{}", row(item));
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

/// Local wall-clock time, minute precision
pub fn time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Cut `s` to at most `width` characters
pub fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

/// Human duration such as `3d 4h` or `25m`
pub fn duration(d: chrono::Duration) -> String {
    let minutes = d.num_minutes().max(0);
    let (days, hours, mins) = (minutes / 1440, (minutes / 60) % 24, minutes % 60);
    match (days, hours) {
        (0, 0) => format!("{}m", mins),
        (0, _) => format!("{}h {}m", hours, mins),
        _ => format!("{}d {}h", days, hours),
    }
}
