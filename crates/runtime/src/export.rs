//! Delimited-text export of a ledger.
//!
//! Layout: `time`, `event`, `actor`, then six columns per roster member in
//! roster order. Numbers are written with two decimals; fields containing the
//! delimiter, a quote or a line break are quoted with doubled inner quotes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use turnline_core::HistoryLedger;

use crate::table::{TableRow, table_rows};

const ACTOR_COLUMNS: [&str; 6] = [
    "base speed",
    "delta speed",
    "current speed",
    "original remaining",
    "delta distance",
    "realtime remaining",
];

/// Writes `ledger` as delimited text, header row first.
pub fn export_delimited<W: Write>(
    ledger: &HistoryLedger,
    writer: &mut W,
    delimiter: char,
) -> io::Result<()> {
    let mut header = vec!["time".to_string(), "event".to_string(), "actor".to_string()];
    for name in ledger.roster_names() {
        header.extend(ACTOR_COLUMNS.iter().map(|column| format!("{name} {column}")));
    }
    write_record(writer, &header, delimiter)?;

    for row in table_rows(ledger) {
        write_record(writer, &row_fields(&row), delimiter)?;
    }

    writer.flush()
}

/// Exports `ledger` to a file at `path`, replacing any existing file.
pub fn export_to_file(ledger: &HistoryLedger, path: &Path, delimiter: char) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    export_delimited(ledger, &mut writer, delimiter)?;

    tracing::info!(
        "Exported {} checkpoints to {}",
        ledger.len(),
        path.display()
    );
    Ok(())
}

fn row_fields(row: &TableRow) -> Vec<String> {
    let mut fields = vec![
        format!("{:.2}", row.time),
        row.kind.to_string(),
        row.triggerer.clone().unwrap_or_default(),
    ];
    for actor in &row.actors {
        fields.extend(
            [
                actor.base_speed,
                actor.delta_speed,
                actor.current_speed,
                actor.original_remaining,
                actor.delta_distance,
                actor.realtime_remaining,
            ]
            .iter()
            .map(|value| format!("{value:.2}")),
        );
    }
    fields
}

fn write_record<W: Write>(writer: &mut W, fields: &[String], delimiter: char) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|field| escape_field(field, delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string());
    writeln!(writer, "{line}")
}

fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains(['"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
