//! Integration tests for sauna-desk
//!
//! These tests verify the end-to-end behavior of the front desk against a
//! real SQLite file.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use sauna_api::{PaymentMethod, TicketType};
use sauna_config::{DeskPolicy, parse_config};
use sauna_core::{CheckInRequest, FrontDesk, SaleRequest};
use sauna_store::{EntryKey, SqliteStore, Store};
use sauna_util::{DeskError, LockerNumber, store_path};
use std::sync::Arc;

fn opening() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 9, 2, 9, 0, 0).unwrap()
}

fn open_at(dir: &std::path::Path, policy: DeskPolicy) -> FrontDesk {
    let store = Arc::new(SqliteStore::open(store_path(dir)).unwrap());
    FrontDesk::open(policy, store).unwrap()
}

fn three_pack() -> SaleRequest {
    SaleRequest {
        customer_name: "Han".into(),
        amount: Some(1200),
        quantity: Some(3),
        ticket_numbers: "A1,A2,A3".into(),
        notes: String::new(),
    }
}

#[test]
fn test_cash_visit_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_at(dir.path(), DeskPolicy::default());
    let now = opening();

    let request =
        CheckInRequest::cash(LockerNumber::new(3), TicketType::Regular, 500).with_name("A");
    let customer = desk.check_in(request, now).unwrap();
    assert_eq!(desk.snapshot().lockers[2], Some(customer.id));

    let receipt = desk.check_out(customer.id, now).unwrap();
    assert_eq!(receipt.bill.overtime_charge, 0);
    assert_eq!(receipt.bill.final_bill, 0);
    assert_eq!(desk.snapshot().lockers[2], None);
}

#[test]
fn test_package_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_at(dir.path(), DeskPolicy::default());
    let now = opening();

    desk.sell_package(three_pack(), now).unwrap();
    let customer = desk
        .check_in(CheckInRequest::ticket(LockerNumber::new(1), "A1"), now)
        .unwrap();
    desk.check_out(customer.id, now + Duration::minutes(90)).unwrap();

    assert_eq!(desk.packages()[0].remaining, 2);
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let now = opening();

    let (id, before) = {
        let mut desk = open_at(dir.path(), DeskPolicy::default());
        desk.sell_package(three_pack(), now).unwrap();
        let customer = desk
            .check_in(CheckInRequest::ticket(LockerNumber::new(12), "A2"), now)
            .unwrap();
        (customer.id, desk.snapshot())
    };

    let mut desk = open_at(dir.path(), DeskPolicy::default());
    assert_eq!(desk.snapshot(), before);

    // Overtime is billed from the stored check-in time
    let receipt = desk
        .check_out(id, now + Duration::hours(3) + Duration::minutes(1))
        .unwrap();
    assert_eq!(receipt.bill.overtime_charge, 100);
    assert_eq!(receipt.package.unwrap().remaining, 2);
}

#[test]
fn test_entries_use_browser_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_at(dir.path(), DeskPolicy::default());
    desk.sell_package(three_pack(), opening()).unwrap();
    drop(desk);

    let store = SqliteStore::open(store_path(dir.path())).unwrap();
    for key in EntryKey::ALL {
        assert!(store.read_entry(key).unwrap().is_some(), "{key} missing");
    }
    let packages = store.read_entry(EntryKey::Packages).unwrap().unwrap();
    assert!(packages.contains("\"ticketNumbers\":\"A1,A2,A3\""));
}

#[test]
fn test_corrupt_store_refuses_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(store_path(dir.path())).unwrap());
    store.write_entry(EntryKey::Customers, "[{\"id\":").unwrap();

    let result = FrontDesk::open(DeskPolicy::default(), store);
    assert!(matches!(result, Err(DeskError::StoreError(_))));
}

#[test]
fn test_export_file_restores_another_desk() {
    let source_dir = tempfile::tempdir().unwrap();
    let target_dir = tempfile::tempdir().unwrap();
    let now = opening();

    let mut desk = open_at(source_dir.path(), DeskPolicy::default());
    desk.sell_package(three_pack(), now).unwrap();
    let a = desk
        .check_in(CheckInRequest::ticket(LockerNumber::new(4), "A3"), now)
        .unwrap();
    desk.check_in(
        CheckInRequest::cash(LockerNumber::new(5), TicketType::Morning, 350),
        now,
    )
    .unwrap();
    desk.check_out(a.id, now + Duration::hours(5)).unwrap();

    let file = source_dir
        .path()
        .join(sauna_store::export_file_name(now.date_naive()));
    std::fs::write(&file, sauna_store::to_bytes(&desk.export(now)).unwrap()).unwrap();

    let mut restored = open_at(target_dir.path(), DeskPolicy::default());
    restored
        .import_bytes(&std::fs::read(&file).unwrap())
        .unwrap();
    assert_eq!(restored.snapshot(), desk.snapshot());

    // And the import itself was persisted
    let reopened = open_at(target_dir.path(), DeskPolicy::default());
    assert_eq!(reopened.snapshot(), desk.snapshot());
}

#[test]
fn test_browser_backup_import() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_at(dir.path(), DeskPolicy::default());

    let backup = br#"{
        "customers": [
            {
                "id": 1725260400000,
                "lockerNumber": "7",
                "customerName": "Seo",
                "notes": "",
                "ticketType": "regular",
                "payment": "ticket",
                "cashAmount": "",
                "ticketNumber": "B2",
                "checkInTime": "2024-09-02T07:00:00.000Z",
                "isCheckedOut": false,
                "expenses": []
            }
        ],
        "packageSales": [
            {
                "id": 1725170000000,
                "customerName": "Seo",
                "notes": "",
                "saleDate": "2024-09-01T03:00:00.000Z",
                "amount": "4000",
                "quantity": "10",
                "ticketNumbers": "B1,B2,B3",
                "remaining": 9
            }
        ],
        "lockers": [null, null, null, null, null, null, 1725260400000],
        "exportDate": "2024-09-02T08:00:00.000Z"
    }"#;

    let outcome = desk.import_bytes(backup).unwrap();
    assert_eq!(outcome.customers, Some(1));

    // The short locker array is padded to the configured capacity
    assert_eq!(desk.lockers().len(), 50);
    let active = desk.active_customers();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].payment, PaymentMethod::Ticket);
    assert_eq!(active[0].cash_amount, None);

    let id = active[0].id;
    let check_out = active[0].check_in_time + Duration::hours(2);
    let receipt = desk.check_out(id, check_out).unwrap();
    assert_eq!(receipt.locker_number, LockerNumber::new(7));
    assert_eq!(receipt.package.unwrap().remaining, 8);
    assert!(desk.lockers()[6].is_free());
}

#[test]
fn test_configured_capacity_and_tariff() {
    let policy = parse_config(
        r#"
        config_version = 1

        [desk]
        locker_capacity = 10
        require_ticket_number = false

        [tariff]
        grace_minutes = 120
        overtime_rate = 200
        "#,
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_at(dir.path(), policy);
    let now = opening();
    assert_eq!(desk.lockers().len(), 10);

    let err = desk
        .check_in(
            CheckInRequest::cash(LockerNumber::new(11), TicketType::Regular, 500),
            now,
        )
        .unwrap_err();
    assert!(matches!(err, DeskError::InvalidSlot { capacity: 10, .. }));

    // Ticket number optional under this config
    let customer = desk
        .check_in(CheckInRequest::ticket(LockerNumber::new(1), ""), now)
        .unwrap();
    let receipt = desk
        .check_out(customer.id, now + Duration::minutes(121))
        .unwrap();
    assert_eq!(receipt.bill.overtime_charge, 200);
    assert!(receipt.package.is_none());
}

#[test]
fn test_monthly_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_at(dir.path(), DeskPolicy::default());
    let day1 = opening();
    let day2 = opening() + Duration::days(1);

    desk.sell_package(three_pack(), day1).unwrap();
    let a = desk
        .check_in(
            CheckInRequest::cash(LockerNumber::new(1), TicketType::Regular, 500),
            day1,
        )
        .unwrap();
    desk.check_out(a.id, day1 + Duration::hours(4)).unwrap();
    let b = desk
        .check_in(CheckInRequest::ticket(LockerNumber::new(2), "A1"), day2)
        .unwrap();
    desk.check_out(b.id, day2 + Duration::hours(1)).unwrap();

    let start = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
    let report = desk.report(start, end);

    assert_eq!(report.daily.len(), 2);
    assert_eq!(report.totals.cash_income, 500);
    assert_eq!(report.totals.overtime_income, 100);
    assert_eq!(report.totals.package_income, 1200);
    assert_eq!(report.totals.ticket_usage_count, 1);
    assert_eq!(report.totals.total_revenue(), 1800);

    let today = desk.daily_overview(day2.date_naive());
    assert_eq!(today.customer_count, 1);
    assert_eq!(today.cash_income, 0);
}
