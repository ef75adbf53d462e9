//! CSV writers for statements and the transfer log.

use std::io::Write;

use csv::{Writer, WriterBuilder};
use dispatch_shared::types::Money;

use super::ExportOptions;
use super::error::ExportError;
use crate::records::Snapshot;
use crate::settlement::{DriverSettlementRow, SettlementRow};
use crate::table::{
    COMPANY_STATEMENT_HEADERS, COMPANY_STATEMENT_TOTAL_COLUMN, DRIVER_STATEMENT_HEADERS,
    DRIVER_STATEMENT_TOTAL_COLUMN, TableRow, company_statement_cells, driver_statement_cells,
    total_cells, transfers_table, yes_no,
};

const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

/// Transfer log columns.
pub const TRANSFER_EXPORT_HEADERS: [&str; 19] = [
    "Internal ID",
    "Transfer No.",
    "Claim No.",
    "Date",
    "Time",
    "Patient",
    "Patient Phone",
    "Driver",
    "Company",
    "ART",
    "Trip Type",
    "Origin City",
    "Origin Address",
    "Destination City",
    "Destination Address",
    "Notes",
    "Waiting",
    "Status",
    "KM",
];

const NOT_AVAILABLE: &str = "N/A";

/// Writes company statement rows followed by a `TOTAL` row.
///
/// # Errors
///
/// Returns an error if the sink rejects a write.
pub fn write_company_statement<W: Write>(
    sink: W,
    rows: &[SettlementRow],
    total: &Money,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let mut writer = open(sink, options)?;
    writer.write_record(COMPANY_STATEMENT_HEADERS)?;

    for row in rows {
        writer.write_record(company_statement_cells(row))?;
    }

    writer.write_record(total_cells(
        COMPANY_STATEMENT_HEADERS.len(),
        COMPANY_STATEMENT_TOTAL_COLUMN,
        total.amount,
    ))?;
    writer.flush()?;
    Ok(())
}

/// Writes driver statement rows followed by a `TOTAL` row.
///
/// # Errors
///
/// Returns an error if the sink rejects a write.
pub fn write_driver_statement<W: Write>(
    sink: W,
    rows: &[DriverSettlementRow],
    total: &Money,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let mut writer = open(sink, options)?;
    writer.write_record(DRIVER_STATEMENT_HEADERS)?;

    for row in rows {
        writer.write_record(driver_statement_cells(row))?;
    }

    writer.write_record(total_cells(
        DRIVER_STATEMENT_HEADERS.len(),
        DRIVER_STATEMENT_TOTAL_COLUMN,
        total.amount,
    ))?;
    writer.flush()?;
    Ok(())
}

/// Writes the full transfer log with driver and company names resolved.
///
/// Rows follow the transfer log order, newest first. Unknown drivers or
/// companies are written as `N/A`.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] when the snapshot has no transfers, or an
/// error if the sink rejects a write.
pub fn write_transfers<W: Write>(
    sink: W,
    snapshot: &Snapshot,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    if snapshot.transfers.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = open(sink, options)?;
    writer.write_record(TRANSFER_EXPORT_HEADERS)?;

    for row in transfers_table(snapshot).rows {
        let TableRow::Transfer {
            transfer: t,
            driver,
            company,
        } = row
        else {
            continue;
        };
        let driver = driver.unwrap_or(NOT_AVAILABLE);
        let company = company.unwrap_or(NOT_AVAILABLE);
        let date = t.date.to_string();
        let km = t.km.to_string();

        writer.write_record([
            t.internal_id.as_str(),
            t.transfer_number.as_str(),
            t.claim_number.as_str(),
            date.as_str(),
            t.time.as_str(),
            t.patient_name.as_str(),
            t.patient_phone.as_str(),
            driver,
            company,
            t.art.as_str(),
            t.trip_type.label(),
            t.origin_city.as_str(),
            t.origin_address.as_str(),
            t.destination_city.as_str(),
            t.destination_address.as_str(),
            t.notes.as_str(),
            yes_no(t.waiting),
            t.status.label(),
            km.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn open<W: Write>(mut sink: W, options: &ExportOptions) -> Result<Writer<W>, ExportError> {
    if options.byte_order_mark {
        sink.write_all(BYTE_ORDER_MARK)?;
    }
    Ok(WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(sink))
}
