//! Output formatting helpers.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use serde::Serialize;

use marquee_core::{GatewayUrl, MediaRecord};

const ID_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 32;
const TYPE_WIDTH: usize = 8;
const DIRECTOR_WIDTH: usize = 24;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the column header for [`record_row`].
pub fn table_header() {
    let header = format!(
        "{:<id$}  {:<title$}  {:<kind$}  {:<director$}  {}",
        "ID",
        "TITLE",
        "TYPE",
        "DIRECTOR",
        "YEAR",
        id = ID_WIDTH,
        title = TITLE_WIDTH,
        kind = TYPE_WIDTH,
        director = DIRECTOR_WIDTH,
    );
    println!("{}", header.bold());
}

/// Print one record as a table row.
pub fn record_row(record: &MediaRecord) {
    println!(
        "{:<id$}  {:<title$}  {:<kind$}  {:<director$}  {}",
        truncate(record.id.as_str(), ID_WIDTH),
        truncate(&record.title, TITLE_WIDTH),
        truncate(record.category.as_str(), TYPE_WIDTH),
        truncate(&record.director, DIRECTOR_WIDTH),
        record.period,
        id = ID_WIDTH,
        title = TITLE_WIDTH,
        kind = TYPE_WIDTH,
        director = DIRECTOR_WIDTH,
    );
}

/// Print records as a table.
pub fn record_table(records: &[&MediaRecord]) {
    table_header();
    for record in records {
        record_row(record);
    }
}

/// Print every field of a record.
pub fn record_details(record: &MediaRecord, gateway: &GatewayUrl) {
    field("ID", record.id.as_str());
    field("Title", &record.title);
    field("Type", record.category.as_str());
    field("Director", &record.director);
    field("Budget", &record.budget);
    field("Location", &record.location);
    field("Duration", &record.duration);
    field("Year/Time", &record.period);
    if let Some(description) = record.description.as_deref().filter(|d| !d.is_empty()) {
        field("Description", description);
    }
    if let Some(poster) = record.poster_url(gateway) {
        field("Poster", &poster);
    }
    field("Created", &timestamp(record.created_at));
    field("Updated", &timestamp(record.updated_at));
}

fn timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten `s` to at most `width` characters, marking the cut with an ellipsis.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
