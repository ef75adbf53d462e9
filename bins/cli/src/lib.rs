//! Command-line front end for the dispatch settlement engine.
//!
//! Loads a snapshot file, runs one command against it, and writes the result
//! to the given sink. Failures carry an [`AppError`] so the binary can map
//! them to stable exit codes.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dispatch_core::access::{Role, View};
use dispatch_core::export::{
    ExportOptions, write_company_statement, write_driver_statement, write_transfers,
};
use dispatch_core::records::Snapshot;
use dispatch_core::settlement::{
    DriverSettlementRow, EntityTotal, SettlementEngine, SettlementRequest, SettlementRow,
    SettlementRun, SettlementService, SettlementWarning,
};
use dispatch_core::table::{
    COMPANY_STATEMENT_HEADERS, COMPANY_STATEMENT_TOTAL_COLUMN, DRIVER_STATEMENT_HEADERS,
    DRIVER_STATEMENT_TOTAL_COLUMN, Table, companies_table, company_statement_cells,
    driver_statement_cells, drivers_table, render_text, total_cells, transfers_table,
};
use dispatch_shared::types::{CompanyId, DriverId, Money};
use dispatch_shared::{AppConfig, AppError};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// Dispatch settlement tool.
#[derive(Debug, Parser)]
#[command(name = "dispatch", author, version, about, long_about = None)]
pub struct Cli {
    /// Snapshot JSON with transfers, drivers and companies.
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Operator role (admin or coordinator).
    #[arg(long, default_value_t = Role::Admin)]
    pub role: Role,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute company and driver statements.
    Settle(SettleArgs),
    /// Show or export the transfer log.
    Transfers {
        /// Output format.
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },
    /// Show the driver directory.
    Drivers,
    /// Show the company directory.
    Companies,
}

/// Arguments of `settle`.
#[derive(Debug, Args)]
pub struct SettleArgs {
    /// First included date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last included date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Restrict the company statement to one company ID.
    #[arg(long, value_name = "ID")]
    pub company: Option<String>,

    /// Restrict the driver statement to one driver ID.
    #[arg(long, value_name = "ID")]
    pub driver: Option<String>,

    /// Which statement to print.
    #[arg(long, value_enum, default_value_t = Statement::Both)]
    pub statement: Statement,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Overrides `settlement.flat_rate_coverage_km`.
    #[arg(long, value_name = "KM")]
    pub flat_rate_km: Option<Decimal>,

    /// Overrides `settlement.default_waiting_hours`.
    #[arg(long, value_name = "HOURS")]
    pub waiting_hours: Option<Decimal>,
}

/// Statement selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Statement {
    /// Company billing statement.
    Company,
    /// Driver payout statement.
    Driver,
    /// Both statements.
    Both,
}

impl Statement {
    const fn company(self) -> bool {
        matches!(self, Self::Company | Self::Both)
    }

    const fn driver(self) -> bool {
        matches!(self, Self::Driver | Self::Both)
    }
}

/// Settlement output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text.
    Table,
    /// Delimited text.
    Csv,
    /// JSON document.
    Json,
}

/// Listing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned text.
    Table,
    /// Delimited text.
    Csv,
}

/// Runs the parsed command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error wrapping [`AppError`] when the snapshot cannot be read,
/// the role is not allowed, configuration is incomplete, or output fails.
pub fn run<W: Write>(cli: &Cli, config: &AppConfig, out: &mut W) -> Result<()> {
    let snapshot = load_snapshot(&cli.snapshot)?;
    info!(
        transfers = snapshot.transfers.len(),
        drivers = snapshot.drivers.len(),
        companies = snapshot.companies.len(),
        "Snapshot loaded"
    );

    match &cli.command {
        Command::Settle(args) => settle(cli.role, args, config, &snapshot, out),
        Command::Transfers { format } => transfers(cli.role, *format, config, &snapshot, out),
        Command::Drivers => directory(cli.role, View::Drivers, &drivers_table(&snapshot), out),
        Command::Companies => {
            directory(cli.role, View::Companies, &companies_table(&snapshot), out)
        }
    }
}

/// Process exit code for an error returned by [`run`].
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppError>().map_or(1, AppError::exit_code)
}

/// Reads and parses a snapshot file.
///
/// # Errors
///
/// Returns `NotFound` when the file cannot be read and `Validation` when it
/// is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::NotFound(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Validation(format!("{}: {e}", path.display())))
}

fn settle<W: Write>(
    role: Role,
    args: &SettleArgs,
    config: &AppConfig,
    snapshot: &Snapshot,
    out: &mut W,
) -> Result<()> {
    let mut settlement = config.settlement.clone();
    if let Some(km) = args.flat_rate_km {
        settlement.flat_rate_coverage_km = Some(km);
    }
    if let Some(hours) = args.waiting_hours {
        settlement.default_waiting_hours = Some(hours);
    }
    let engine = SettlementEngine::from_config(&settlement)?;

    let mut request = SettlementRequest::new().with_period(args.from, args.to);
    if let Some(id) = &args.company {
        request = request.with_company(CompanyId::new(id.as_str()));
    }
    if let Some(id) = &args.driver {
        request = request.with_driver(DriverId::new(id.as_str()));
    }

    let run = SettlementService::run(role, &engine, snapshot, &request).map_err(AppError::from)?;

    match args.format {
        OutputFormat::Table => write_settlement_text(&run, args.statement, out)?,
        OutputFormat::Csv => {
            let options = ExportOptions::from_config(&config.export)?;
            write_settlement_csv(&run, args.statement, options, out)?;
        }
        OutputFormat::Json => write_settlement_json(&run, args.statement, out)?,
    }
    Ok(())
}

fn write_settlement_text<W: Write>(
    run: &SettlementRun,
    statement: Statement,
    out: &mut W,
) -> Result<()> {
    if statement.company() {
        let mut rows: Vec<Vec<String>> = run.company_rows.iter().map(company_statement_cells).collect();
        rows.push(total_cells(
            COMPANY_STATEMENT_HEADERS.len(),
            COMPANY_STATEMENT_TOTAL_COLUMN,
            run.company_total.amount,
        ));
        writeln!(out, "Company statement")?;
        writeln!(out, "{}", render_text(&COMPANY_STATEMENT_HEADERS, &rows))?;
        writeln!(out)?;
        writeln!(out, "{}", render_subtotals("Company", &run.company_subtotals))?;
    }
    if statement.company() && statement.driver() {
        writeln!(out)?;
    }
    if statement.driver() {
        let mut rows: Vec<Vec<String>> = run.driver_rows.iter().map(driver_statement_cells).collect();
        rows.push(total_cells(
            DRIVER_STATEMENT_HEADERS.len(),
            DRIVER_STATEMENT_TOTAL_COLUMN,
            run.driver_total.amount,
        ));
        writeln!(out, "Driver statement")?;
        writeln!(out, "{}", render_text(&DRIVER_STATEMENT_HEADERS, &rows))?;
        writeln!(out)?;
        writeln!(out, "{}", render_subtotals("Driver", &run.driver_subtotals))?;
    }
    Ok(())
}

fn render_subtotals(party: &str, subtotals: &[EntityTotal]) -> String {
    let rows: Vec<Vec<String>> = subtotals
        .iter()
        .map(|s| vec![s.label.clone(), s.legs.to_string(), s.total.to_string()])
        .collect();
    render_text(&[party, "Legs", "Total"], &rows)
}

fn write_settlement_csv<W: Write>(
    run: &SettlementRun,
    statement: Statement,
    options: ExportOptions,
    out: &mut W,
) -> Result<()> {
    if statement.company() {
        write_company_statement(&mut *out, &run.company_rows, &run.company_total, &options)
            .map_err(AppError::from)?;
    }
    if statement.driver() {
        let options = if statement.company() {
            writeln!(out)?;
            options.without_bom()
        } else {
            options
        };
        write_driver_statement(&mut *out, &run.driver_rows, &run.driver_total, &options)
            .map_err(AppError::from)?;
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatementDocument<'a, R> {
    rows: &'a [R],
    total: &'a Money,
    subtotals: &'a [EntityTotal],
    warnings: &'a [SettlementWarning],
}

fn write_settlement_json<W: Write>(
    run: &SettlementRun,
    statement: Statement,
    out: &mut W,
) -> Result<()> {
    match statement {
        Statement::Both => serde_json::to_writer_pretty(&mut *out, run)?,
        Statement::Company => serde_json::to_writer_pretty(
            &mut *out,
            &StatementDocument::<SettlementRow> {
                rows: &run.company_rows,
                total: &run.company_total,
                subtotals: &run.company_subtotals,
                warnings: &run.warnings,
            },
        )?,
        Statement::Driver => serde_json::to_writer_pretty(
            &mut *out,
            &StatementDocument::<DriverSettlementRow> {
                rows: &run.driver_rows,
                total: &run.driver_total,
                subtotals: &run.driver_subtotals,
                warnings: &run.warnings,
            },
        )?,
    }
    writeln!(out)?;
    Ok(())
}

fn transfers<W: Write>(
    role: Role,
    format: ListFormat,
    config: &AppConfig,
    snapshot: &Snapshot,
    out: &mut W,
) -> Result<()> {
    match format {
        ListFormat::Table => directory(role, View::Transfers, &transfers_table(snapshot), out),
        ListFormat::Csv => {
            if !role.can_export_transfers() {
                return Err(AppError::Forbidden(format!("role {role} may not export transfers")).into());
            }
            let options = ExportOptions::from_config(&config.export)?;
            write_transfers(&mut *out, snapshot, &options).map_err(AppError::from)?;
            Ok(())
        }
    }
}

fn directory<W: Write>(role: Role, view: View, table: &Table<'_>, out: &mut W) -> Result<()> {
    if !role.can_view(view) {
        return Err(AppError::Forbidden(format!("role {role} may not view {view:?}")).into());
    }
    if table.is_empty() {
        writeln!(out, "No data to show.")?;
    } else {
        writeln!(out, "{}", table.render())?;
    }
    Ok(())
}
