//! Tabular views of the record directories.
//!
//! Each row kind is a closed variant with fixed headers, so renderers (text
//! tables, CSV) never need to know which record they are printing.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::records::{Company, Driver, Snapshot, Transfer};
use crate::settlement::{DriverSettlementRow, SettlementRow};

/// Transfer log columns.
pub const TRANSFER_HEADERS: [&str; 8] = [
    "Date & Time",
    "Patient",
    "Origin",
    "Destination",
    "Driver",
    "Company",
    "KM",
    "Status",
];

/// Driver directory columns.
pub const DRIVER_HEADERS: [&str; 5] = ["Name", "DNI", "Phone", "Email", "License Expiry"];

/// Company directory columns.
pub const COMPANY_HEADERS: [&str; 4] = ["Name", "CUIT", "Email", "Contact"];

/// Company statement columns.
pub const COMPANY_STATEMENT_HEADERS: [&str; 14] = [
    "Date",
    "Transfer No.",
    "Claim No.",
    "Patient",
    "Origin",
    "Destination",
    "KM",
    "Urban Amount",
    "Interurban Amount",
    "Waiting Hours",
    "Waiting Amount",
    "Misc Expenses",
    "Total",
    "Leg",
];

/// Index of `Total` in [`COMPANY_STATEMENT_HEADERS`].
pub const COMPANY_STATEMENT_TOTAL_COLUMN: usize = COMPANY_STATEMENT_HEADERS.len() - 2;

/// Driver statement columns.
pub const DRIVER_STATEMENT_HEADERS: [&str; 10] = [
    "Date", "Patient", "From", "To", "Outbound", "Return", "Waiting", "Expenses", "Contract",
    "Total",
];

/// Index of `Total` in [`DRIVER_STATEMENT_HEADERS`].
pub const DRIVER_STATEMENT_TOTAL_COLUMN: usize = DRIVER_STATEMENT_HEADERS.len() - 1;

/// One displayable row.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRow<'s> {
    /// A transfer with its driver and company names resolved.
    Transfer {
        /// The transfer.
        transfer: &'s Transfer,
        /// Driver name, if the driver exists.
        driver: Option<&'s str>,
        /// Company name, if the company exists.
        company: Option<&'s str>,
    },
    /// A driver.
    Driver(&'s Driver),
    /// A company.
    Company(&'s Company),
}

impl TableRow<'_> {
    /// Column headers for this row kind.
    #[must_use]
    pub const fn headers(&self) -> &'static [&'static str] {
        match self {
            Self::Transfer { .. } => &TRANSFER_HEADERS,
            Self::Driver(_) => &DRIVER_HEADERS,
            Self::Company(_) => &COMPANY_HEADERS,
        }
    }

    /// Cell values in header order. Unknown names render as empty cells.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        match self {
            Self::Transfer {
                transfer,
                driver,
                company,
            } => vec![
                format!("{} {}", transfer.date, transfer.time).trim_end().to_owned(),
                transfer.patient_name.clone(),
                transfer.origin_city.clone(),
                transfer.destination_city.clone(),
                driver.unwrap_or_default().to_owned(),
                company.unwrap_or_default().to_owned(),
                transfer.km.to_string(),
                transfer.status.label().to_owned(),
            ],
            Self::Driver(driver) => vec![
                driver.name.clone(),
                driver.dni.clone(),
                driver.phone.clone(),
                driver.email.clone(),
                driver.license_expiry.clone(),
            ],
            Self::Company(company) => vec![
                company.name.clone(),
                company.cuit.clone(),
                company.email.clone(),
                company.contact.clone(),
            ],
        }
    }
}

/// Headers plus rows of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<'s> {
    /// Column headers.
    pub headers: &'static [&'static str],
    /// Rows in display order.
    pub rows: Vec<TableRow<'s>>,
}

impl Table<'_> {
    /// Returns true if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as aligned plain text.
    #[must_use]
    pub fn render(&self) -> String {
        let body: Vec<Vec<String>> = self.rows.iter().map(TableRow::cells).collect();
        render_text(self.headers, &body)
    }
}

/// Cells of a company statement row, in [`COMPANY_STATEMENT_HEADERS`] order.
#[must_use]
pub fn company_statement_cells(row: &SettlementRow) -> Vec<String> {
    vec![
        row.date.to_string(),
        row.transfer_number.clone(),
        row.claim_number.clone(),
        row.patient_name.clone(),
        row.origin.clone(),
        row.destination.clone(),
        row.km.to_string(),
        row.urban_amount.to_string(),
        row.interurban_amount.to_string(),
        row.waiting_time.map(|hours| hours.to_string()).unwrap_or_default(),
        row.waiting_amount.to_string(),
        row.misc_expenses.to_string(),
        row.total_amount.to_string(),
        row.trip_part.map(|part| part.to_string()).unwrap_or_default(),
    ]
}

/// Cells of a driver statement row, in [`DRIVER_STATEMENT_HEADERS`] order.
#[must_use]
pub fn driver_statement_cells(row: &DriverSettlementRow) -> Vec<String> {
    vec![
        row.date.to_string(),
        row.patient_name.clone(),
        row.from.clone(),
        row.to.clone(),
        yes_no(row.is_outbound).to_owned(),
        yes_no(row.is_return).to_owned(),
        yes_no(row.waiting).to_owned(),
        row.expenses.to_string(),
        row.art.clone(),
        row.total.to_string(),
    ]
}

/// A closing row with `TOTAL` in the first cell and the amount in `total_column`.
#[must_use]
pub fn total_cells(width: usize, total_column: usize, total: Decimal) -> Vec<String> {
    let mut cells = vec![String::new(); width];
    if let Some(first) = cells.first_mut() {
        "TOTAL".clone_into(first);
    }
    if let Some(cell) = cells.get_mut(total_column) {
        *cell = total.to_string();
    }
    cells
}

/// Renders headers and rows as left-aligned columns separated by two spaces.
#[must_use]
pub fn render_text(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![aligned_line(headers.iter().copied(), &widths)];
    out.extend(
        rows.iter()
            .map(|cells| aligned_line(cells.iter().map(String::as_str), &widths)),
    );
    out.join("\n")
}

fn aligned_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

/// `Yes` or `No`.
#[must_use]
pub const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Transfer log, newest first (date then time, both descending).
#[must_use]
pub fn transfers_table(snapshot: &Snapshot) -> Table<'_> {
    let drivers: HashMap<&str, &str> = snapshot
        .drivers
        .iter()
        .rev()
        .map(|d| (d.id.as_str(), d.name.as_str()))
        .collect();
    let companies: HashMap<&str, &str> = snapshot
        .companies
        .iter()
        .rev()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut transfers: Vec<&Transfer> = snapshot.transfers.iter().collect();
    transfers.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.time.cmp(&a.time)));

    Table {
        headers: &TRANSFER_HEADERS,
        rows: transfers
            .into_iter()
            .map(|transfer| TableRow::Transfer {
                transfer,
                driver: drivers.get(transfer.driver_id.as_str()).copied(),
                company: companies.get(transfer.company_id.as_str()).copied(),
            })
            .collect(),
    }
}

/// Driver directory in snapshot order.
#[must_use]
pub fn drivers_table(snapshot: &Snapshot) -> Table<'_> {
    Table {
        headers: &DRIVER_HEADERS,
        rows: snapshot.drivers.iter().map(TableRow::Driver).collect(),
    }
}

/// Company directory in snapshot order.
#[must_use]
pub fn companies_table(snapshot: &Snapshot) -> Table<'_> {
    Table {
        headers: &COMPANY_HEADERS,
        rows: snapshot.companies.iter().map(TableRow::Company).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SNAPSHOT: &str = r#"{
        "transfers": [
            {"id": "t1", "date": "2024-07-20", "time": "10:00", "patientName": "Ana",
             "driverId": "driv1", "companyId": "comp1", "tripType": "IDA",
             "originCity": "Buenos Aires", "destinationCity": "La Plata",
             "status": "Realizado", "km": 60},
            {"id": "t2", "date": "2024-07-21", "time": "08:30", "patientName": "Luis",
             "driverId": "ghost", "companyId": "comp1", "tripType": "IDA",
             "status": "Anulado"},
            {"id": "t3", "date": "2024-07-20", "time": "15:45", "patientName": "Marta",
             "driverId": "driv1", "companyId": "comp1", "tripType": "IDA Y VUELTA",
             "status": "Realizado", "km": "12.5"}
        ],
        "drivers": [
            {"id": "driv1", "name": "Carlos Rodriguez", "dni": "30123456",
             "phone": "1155667788", "email": "carlos@example.com",
             "licenseExpiry": "2025-12-31",
             "costPerKm": 100, "fixedRate": 3000, "waitingHourCost": 800}
        ],
        "companies": [
            {"id": "comp1", "name": "Clinica Central", "cuit": "30-12345678-9",
             "email": "admin@clinica.com", "contact": "Laura",
             "costPerKm": 150, "fixedRate": 5000, "waitingHourCost": 1200}
        ]
    }"#;

    fn snapshot() -> Snapshot {
        serde_json::from_str(SNAPSHOT).unwrap()
    }

    #[test]
    fn test_transfers_newest_first() {
        let snapshot = snapshot();
        let table = transfers_table(&snapshot);
        let patients: Vec<String> = table.rows.iter().map(|r| r.cells()[1].clone()).collect();
        assert_eq!(patients, vec!["Luis", "Marta", "Ana"]);
    }

    #[test]
    fn test_transfer_cells_resolve_names() {
        let snapshot = snapshot();
        let table = transfers_table(&snapshot);

        assert_eq!(
            table.rows[2].cells(),
            vec![
                "2024-07-20 10:00",
                "Ana",
                "Buenos Aires",
                "La Plata",
                "Carlos Rodriguez",
                "Clinica Central",
                "60",
                "Realizado",
            ]
        );
        let unresolved = table.rows[0].cells();
        assert_eq!(unresolved[4], "");
        assert_eq!(unresolved[6], "");
        assert_eq!(unresolved[7], "Anulado");
    }

    #[test]
    fn test_directory_tables() {
        let snapshot = snapshot();
        let drivers = drivers_table(&snapshot);
        assert_eq!(drivers.headers, &DRIVER_HEADERS);
        assert_eq!(
            drivers.rows[0].cells(),
            vec!["Carlos Rodriguez", "30123456", "1155667788", "carlos@example.com", "2025-12-31"]
        );

        let companies = companies_table(&snapshot);
        assert_eq!(companies.rows[0].headers(), &COMPANY_HEADERS);
        assert_eq!(companies.rows[0].cells()[1], "30-12345678-9");
    }

    #[test]
    fn test_total_columns_point_at_total_header() {
        assert_eq!(COMPANY_STATEMENT_HEADERS[COMPANY_STATEMENT_TOTAL_COLUMN], "Total");
        assert_eq!(DRIVER_STATEMENT_HEADERS[DRIVER_STATEMENT_TOTAL_COLUMN], "Total");

        let cells = total_cells(
            DRIVER_STATEMENT_HEADERS.len(),
            DRIVER_STATEMENT_TOTAL_COLUMN,
            dec!(5),
        );
        assert_eq!(cells[0], "TOTAL");
        assert_eq!(cells[9], "5");
    }

    #[test]
    fn test_render_aligns_columns() {
        let snapshot = snapshot();
        let rendered = companies_table(&snapshot).render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Name             CUIT"));
        assert!(lines[1].starts_with("Clinica Central  30-12345678-9"));
        assert!(Table { headers: &COMPANY_HEADERS, rows: Vec::new() }.is_empty());
    }
}
