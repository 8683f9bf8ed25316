//! N1 resolution and N2 ticket tables.

use tracing::{debug, trace};

use crate::models::report::{ResolutionRecord, TicketRecord};
use crate::pdf::RawTable;

use super::numbers::{parse_count, parse_french_decimal};
use super::patterns::{RESOLUTION_TABLE_MARKER, TICKETS_TABLE_MARKERS};
use super::policy::{FieldOutcome, RESOLUTION_CELL, TICKET_COUNT, TICKET_DAY};

/// Number of month columns in the tickets table.
const TICKET_MONTH_COLUMNS: usize = 8;

fn cell_at(row: &[Option<String>], col: usize) -> Option<&str> {
    row.get(col)?.as_deref()
}

fn resolution_count(row: &[Option<String>], col: usize) -> u64 {
    FieldOutcome::apply(cell_at(row, col).and_then(parse_count), RESOLUTION_CELL)
        .into_option()
        .unwrap_or_default()
}

/// Rows of the first table mentioning `résolus par N1`.
///
/// Every data row yields a record, blank rows included. Columns 1 to 4 hold
/// N2, calls, N1-resolved and percentage. Missing or non-numeric cells read
/// as zero.
pub fn extract_resolution(tables: &[RawTable]) -> Vec<ResolutionRecord> {
    let Some(table) = tables.iter().find(|t| t.contains(RESOLUTION_TABLE_MARKER)) else {
        return Vec::new();
    };

    let records: Vec<ResolutionRecord> = table
        .data_rows()
        .iter()
        .enumerate()
        .map(|(i, row)| ResolutionRecord {
            index: i as u32 + 1,
            n2: resolution_count(row, 1),
            calls: resolution_count(row, 2),
            resolved_n1: resolution_count(row, 3),
            percentage: FieldOutcome::apply(
                cell_at(row, 4).and_then(parse_french_decimal),
                RESOLUTION_CELL,
            )
            .into_option()
            .unwrap_or_default(),
        })
        .collect();

    debug!("Resolution table: {} rows", records.len());
    records
}

/// Day rows of the first table with a `Tickets N2` cell.
///
/// A row whose first cell is not a positive day number is dropped. Month
/// cells 1 to 8 become `mois_N` when numeric.
pub fn extract_tickets(tables: &[RawTable]) -> Vec<TicketRecord> {
    let Some(table) = tables
        .iter()
        .find(|t| t.any_cell(|cell| TICKETS_TABLE_MARKERS.iter().all(|m| cell.contains(m))))
    else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for row in table.data_rows() {
        let day = cell_at(row, 0)
            .and_then(parse_count)
            .filter(|day| *day > 0)
            .and_then(|day| u32::try_from(day).ok());
        let day = FieldOutcome::apply(day, TICKET_DAY);
        if day.drops_row() {
            trace!("Dropped ticket row {:?}", row);
            continue;
        }
        let Some(day) = day.into_option() else {
            continue;
        };

        let mut record = TicketRecord {
            day,
            ..Default::default()
        };
        for n in 1..=TICKET_MONTH_COLUMNS {
            let count = cell_at(row, n).and_then(parse_count);
            if let Some(count) = FieldOutcome::apply(count, TICKET_COUNT).into_option() {
                record.counts.insert(TicketRecord::month_key(n), count);
            }
        }
        records.push(record);
    }

    debug!("Tickets table: {} rows", records.len());
    records
}
