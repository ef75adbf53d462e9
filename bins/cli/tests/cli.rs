//! End-to-end tests for the `dispatch` command.

use std::io::Write;

use clap::Parser;
use dispatch_cli::{Cli, exit_code, run};
use dispatch_shared::AppConfig;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

const SNAPSHOT: &str = r#"{
    "transfers": [
        {"id": "trans1", "internalId": "INT001", "transferNumber": "TRN001",
         "claimNumber": "SIN001", "date": "2024-07-20", "time": "10:00",
         "patientName": "Ana Martinez", "driverId": "driv1", "companyId": "comp1",
         "art": "Prevencion ART", "tripType": "IDA Y VUELTA",
         "originCity": "Buenos Aires", "originAddress": "Av. Corrientes 1234",
         "destinationCity": "La Plata", "destinationAddress": "Calle 7 567",
         "waiting": true, "status": "Realizado", "km": 60},
        {"id": "trans2", "internalId": "INT002", "transferNumber": "TRN002",
         "claimNumber": "SIN002", "date": "2024-07-22", "time": "09:15",
         "patientName": "Jorge Diaz", "driverId": "driv1", "companyId": "comp1",
         "tripType": "IDA", "originCity": "Quilmes", "destinationCity": "Avellaneda",
         "status": "Anulado", "km": 12},
        {"id": "trans3", "internalId": "INT003", "transferNumber": "TRN003",
         "claimNumber": "SIN003", "date": "2024-07-23", "time": "14:00",
         "patientName": "Marta Gomez", "driverId": "ghost", "companyId": "comp1",
         "tripType": "IDA", "originCity": "Lanus", "destinationCity": "Banfield",
         "status": "Realizado", "km": "8"}
    ],
    "drivers": [
        {"id": "driv1", "name": "Carlos Rodriguez", "dni": "30123456",
         "phone": "1155667788", "email": "carlos@example.com",
         "licenseExpiry": "2025-12-31",
         "costPerKm": 100, "fixedRate": 3000, "waitingHourCost": 800}
    ],
    "companies": [
        {"id": "comp1", "name": "Clinica Central", "cuit": "30-12345678-9",
         "email": "admin@clinica.com", "contact": "Laura Perez",
         "costPerKm": 150, "fixedRate": 5000, "waitingHourCost": 1200}
    ]
}"#;

fn snapshot_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();
    file
}

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.settlement.flat_rate_coverage_km = Some(dec!(20));
    config.settlement.default_waiting_hours = Some(dec!(1));
    config.export.byte_order_mark = false;
    config
}

fn invoke(file: &NamedTempFile, args: &[&str], config: &AppConfig) -> anyhow::Result<String> {
    let path = file.path().to_str().unwrap();
    let argv = ["dispatch", "--snapshot", path].into_iter().chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut out = Vec::new();
    run(&cli, config, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_settle_company_csv() {
    let file = snapshot_file();
    let out = invoke(
        &file,
        &["settle", "--statement", "company", "--format", "csv"],
        &config(),
    )
    .unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("2024-07-20,TRN001,"));
    assert!(lines[1].ends_with(",12200.00,A"));
    assert!(lines[2].ends_with(",11000.00,B"));
    assert!(lines[3].starts_with("2024-07-23,TRN003,"));
    assert_eq!(lines[4], "TOTAL,,,,,,,,,,,,28200.00,");
}

#[test]
fn test_settle_json_both_statements() {
    let file = snapshot_file();
    let out = invoke(&file, &["settle", "--format", "json"], &config()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(doc["companyRows"].as_array().unwrap().len(), 3);
    assert_eq!(doc["driverRows"].as_array().unwrap().len(), 3);
    assert_eq!(doc["companyTotal"]["amount"], "28200.00");
    assert_eq!(doc["driverTotal"]["amount"], "14800.00");
    assert_eq!(doc["warnings"][0]["kind"], "missing_driver");
    assert_eq!(doc["driverSubtotals"][1]["label"], "unknown");
}

#[test]
fn test_settle_text_with_driver_filter() {
    let file = snapshot_file();
    let out = invoke(
        &file,
        &["settle", "--statement", "driver", "--driver", "driv1"],
        &config(),
    )
    .unwrap();

    assert!(out.starts_with("Driver statement\n"));
    assert!(out.contains("Prevencion ART"));
    assert!(!out.contains("Marta Gomez"));
    assert!(out.contains("Carlos Rodriguez  2     14800.00"));
}

#[test]
fn test_settle_requires_coverage_threshold() {
    let file = snapshot_file();
    let mut config = config();
    config.settlement.flat_rate_coverage_km = None;

    let err = invoke(&file, &["settle"], &config).unwrap_err();
    assert_eq!(exit_code(&err), 78);
    assert!(err.to_string().contains("settlement.flat_rate_coverage_km"));

    let out = invoke(
        &file,
        &["settle", "--flat-rate-km", "60", "--format", "json"],
        &config,
    )
    .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["companyTotal"]["amount"], "16200.00");
}

#[test]
fn test_reversed_period_is_validation_error() {
    let file = snapshot_file();
    let err = invoke(
        &file,
        &["settle", "--from", "2024-07-31", "--to", "2024-07-01"],
        &config(),
    )
    .unwrap_err();
    assert_eq!(exit_code(&err), 2);
}

#[test]
fn test_coordinator_limited_to_transfer_log() {
    let file = snapshot_file();
    let coordinator = |args: &[&str]| {
        let mut full = vec!["--role", "coordinator"];
        full.extend_from_slice(args);
        invoke(&file, &full, &config())
    };

    let out = coordinator(&["transfers"]).unwrap();
    assert!(out.contains("Marta Gomez"));

    let denied: [&[&str]; 4] = [
        &["settle"],
        &["drivers"],
        &["companies"],
        &["transfers", "--format", "csv"],
    ];
    for args in denied {
        let err = coordinator(args).unwrap_err();
        assert_eq!(exit_code(&err), 3, "{args:?}");
    }
}

#[test]
fn test_transfers_csv_export() {
    let file = snapshot_file();
    let mut config = config();
    config.export.byte_order_mark = true;

    let out = invoke(&file, &["transfers", "--format", "csv"], &config).unwrap();
    assert!(out.starts_with('\u{feff}'));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("INT003,TRN003,"));
    assert!(lines[1].contains(",N/A,Clinica Central,"));
    assert!(lines[2].starts_with("INT002,"));
    assert!(lines[3].starts_with("INT001,"));
}

#[test]
fn test_directories() {
    let file = snapshot_file();
    let drivers = invoke(&file, &["drivers"], &config()).unwrap();
    assert!(drivers.contains("Carlos Rodriguez"));
    assert!(drivers.contains("2025-12-31"));

    let companies = invoke(&file, &["companies"], &config()).unwrap();
    assert!(companies.contains("30-12345678-9"));
}

#[test]
fn test_missing_snapshot_file() {
    let cli = Cli::try_parse_from(["dispatch", "--snapshot", "/nonexistent/snapshot.json", "drivers"])
        .unwrap();
    let err = run(&cli, &config(), &mut Vec::new()).unwrap_err();
    assert_eq!(exit_code(&err), 4);
}
