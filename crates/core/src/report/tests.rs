//! Tests for the report entity.

use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use consignment_shared::types::{ManufacturerId, ReportId, StockMovementId};
use consignment_shared::{Currency, Money, MoneyError};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal_macros::dec;

use super::entity::{Report, StoredReport};
use super::error::ReportError;
use super::types::ReportStatus;
use super::validation::MAX_FILE_LENGTH;
use crate::stock::StockMovement;

fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minute)
}

fn movement(quantity: i32, price: i64, currency: Currency, minute: i64) -> StockMovement {
    StockMovement::new(
        StockMovementId::new(),
        quantity,
        Money::new(price.into(), currency),
        at(minute),
    )
    .unwrap()
}

fn dkk(quantity: i32, price: i64) -> StockMovement {
    movement(quantity, price, Currency::DKK, 0)
}

fn valid_report() -> Report {
    Report::new(ManufacturerId::new())
}

fn report_with_status(status: ReportStatus) -> Report {
    let mut report = valid_report();
    match status {
        ReportStatus::Pending => {}
        ReportStatus::Successful => {
            report.mark_as_success();
        }
        ReportStatus::Error => {
            report.mark_as_error(None);
        }
    }
    report
}

// ============================================================================
// Construction & status machine
// ============================================================================

#[test]
fn test_new_report_is_pending_and_empty() {
    let report = valid_report();

    assert_eq!(report.status(), ReportStatus::Pending);
    assert_eq!(report.stock_movement_count(), 0);
    assert!(report.error().is_none());
    assert!(report.file().is_none());
    assert!(report.id().is_none());
    assert!(!report.is_successful());
    assert!(!report.is_error());
    assert!(!report.is_deliverable());
}

#[test]
fn test_mark_as_success_clears_error() {
    let mut report = valid_report();
    report.mark_as_error(Some("error".to_string()));
    report.mark_as_success();

    assert_eq!(report.status(), ReportStatus::Successful);
    assert!(report.error().is_none());
    assert!(report.is_successful());
}

#[test]
fn test_mark_as_error_sets_message() {
    let mut report = valid_report();
    report.mark_as_error(Some("error".to_string()));

    assert_eq!(report.status(), ReportStatus::Error);
    assert_eq!(report.error(), Some("error"));
    assert!(report.is_error());
}

#[test]
fn test_mark_as_error_without_message() {
    let mut report = valid_report();
    report.mark_as_error(Some("first".to_string()));
    report.mark_as_error(None);

    assert!(report.is_error());
    assert!(report.error().is_none());
}

#[rstest]
#[case::pending(ReportStatus::Pending)]
#[case::successful(ReportStatus::Successful)]
#[case::error(ReportStatus::Error)]
fn test_transitions_from_any_state(#[case] start: ReportStatus) {
    let mut report = report_with_status(start);
    assert_eq!(report.status(), start);
    report.mark_as_error(Some("failed".to_string()));
    assert!(report.is_status(ReportStatus::Error));
    assert_eq!(report.error(), Some("failed"));

    let mut report = report_with_status(start);
    report.mark_as_success();
    assert!(report.is_status(ReportStatus::Successful));
    assert!(report.error().is_none());
}

#[rstest]
#[case::successful(ReportStatus::Successful)]
#[case::error(ReportStatus::Error)]
fn test_finished_report_never_returns_to_pending(#[case] finished: ReportStatus) {
    let mut report = report_with_status(finished);

    report
        .add_stock_movement(dkk(1, 100))
        .clear_stock_movements()
        .set_manufacturer(ManufacturerId::new())
        .set_file("var/reports/rerun.csv")
        .unwrap();
    report.touch(at(0));
    report.mark_as_error(None).mark_as_success();

    assert!(!report.is_status(ReportStatus::Pending));
}

#[rstest]
#[case(ReportStatus::Pending)]
#[case(ReportStatus::Successful)]
#[case(ReportStatus::Error)]
fn test_deliverable_matches_successful(#[case] status: ReportStatus) {
    let report = report_with_status(status);
    assert_eq!(report.is_deliverable(), report.is_successful());
}

// ============================================================================
// Identity, timestamps, file
// ============================================================================

#[test]
fn test_assign_id_is_immutable_once_set() {
    let mut report = valid_report();
    let id = ReportId::new();

    report.assign_id(id).unwrap();
    report.assign_id(id).unwrap();
    assert_eq!(report.id(), Some(id));

    let err = report.assign_id(ReportId::new()).unwrap_err();
    assert!(matches!(err, ReportError::IdAlreadyAssigned { current, .. } if current == id));
    assert_eq!(report.id(), Some(id));
}

#[test]
fn test_touch_keeps_created_at() {
    let mut report = valid_report();
    report.touch(at(0));
    report.touch(at(5));

    assert_eq!(report.created_at(), Some(at(0)));
    assert_eq!(report.updated_at(), Some(at(5)));
}

#[test]
fn test_file_roundtrip() {
    let mut report = valid_report();
    report.set_file("var/reports/2024-03.csv").unwrap();

    assert_eq!(report.file(), Some(PathBuf::from("var/reports/2024-03.csv")));
    assert_eq!(report.file_path(), Some("var/reports/2024-03.csv"));
}

#[test]
fn test_empty_file_reads_as_none() {
    let mut report = valid_report();
    report.set_file("").unwrap();
    assert!(report.file().is_none());
}

#[cfg(unix)]
#[test]
fn test_set_file_rejects_non_utf8_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let mut report = valid_report();
    report.set_file("var/reports/previous.csv").unwrap();

    let err = report
        .set_file(OsStr::from_bytes(b"var/reports/r\xff.csv"))
        .unwrap_err();

    assert_eq!(err.field, "file");
    assert_eq!(report.file_path(), Some("var/reports/previous.csv"));
}

#[test]
fn test_file_roundtrip_is_exact() {
    let mut report = valid_report();
    let path = PathBuf::from("var/reports/lager æøå/2024-03.csv");
    report.set_file(&path).unwrap();
    assert_eq!(report.file(), Some(path));
}

#[test]
fn test_chained_setters() {
    let manufacturer = ManufacturerId::new();
    let first = dkk(1, 100);
    let mut report = Report::default();
    report
        .set_manufacturer(manufacturer)
        .mark_as_success()
        .set_file("test")
        .unwrap()
        .set_stock_movements(vec![first.clone()]);

    report.validate().unwrap();
    assert_eq!(report.manufacturer(), Some(manufacturer));
    assert_eq!(report.status(), ReportStatus::Successful);
    assert_eq!(report.file(), Some(PathBuf::from("test")));
    assert_eq!(report.stock_movements(), &[first]);
}

// ============================================================================
// Stock movement collection
// ============================================================================

#[test]
fn test_add_stock_movement_is_idempotent() {
    let mut report = valid_report();
    let m = dkk(1, 100);

    report.add_stock_movement(m.clone()).add_stock_movement(m.clone());

    assert_eq!(report.stock_movement_count(), 1);
    assert!(report.contains_stock_movement(m.id()));
}

#[test]
fn test_remove_and_clear_stock_movements() {
    let mut report = valid_report();
    let first = dkk(1, 100);
    let second = dkk(2, 200);
    report
        .add_stock_movement(first.clone())
        .add_stock_movement(second.clone());

    report.remove_stock_movement(&second);
    assert_eq!(report.stock_movements()[0], first);
    assert_eq!(report.stock_movement_count(), 1);

    // Not referenced: no-op.
    report.remove_stock_movement(&second);
    assert_eq!(report.stock_movement_count(), 1);

    report.clear_stock_movements();
    assert_eq!(report.stock_movement_count(), 0);
    assert!(report.stock_movements().is_empty());
}

#[test]
fn test_set_stock_movements_merges() {
    let mut report = valid_report();
    let existing = movement(1, 10, Currency::DKK, 1);
    let incoming = movement(1, 20, Currency::DKK, 2);
    report.add_stock_movement(existing.clone());

    report.set_stock_movements(vec![existing.clone(), incoming.clone()]);

    assert_eq!(report.stock_movements(), &[existing, incoming]);
}

#[test]
fn test_stock_movements_ordered_by_creation() {
    let mut report = valid_report();
    let late = movement(1, 1, Currency::DKK, 30);
    let early = movement(1, 1, Currency::DKK, 10);
    let middle = movement(1, 1, Currency::DKK, 20);

    report
        .add_stock_movement(late.clone())
        .add_stock_movement(early.clone())
        .add_stock_movement(middle.clone());

    assert_eq!(report.stock_movements(), &[early, middle, late]);
}

#[test]
fn test_equal_timestamps_keep_insertion_order() {
    let mut report = valid_report();
    let first = movement(1, 1, Currency::DKK, 5);
    let second = movement(2, 1, Currency::DKK, 5);

    report
        .add_stock_movement(first.clone())
        .add_stock_movement(second.clone());

    assert_eq!(report.stock_movements(), &[first, second]);
}

// ============================================================================
// Totals
// ============================================================================

#[test]
fn test_total() {
    let mut report = valid_report();
    report.add_stock_movement(dkk(1, 100)).add_stock_movement(dkk(2, 200));

    assert_eq!(
        report.total_or_default().unwrap(),
        Money::new(dec!(500), Currency::DKK)
    );
}

#[test]
fn test_total_with_no_stock_movements() {
    let report = valid_report();

    assert_eq!(
        report.total(Currency::USD).unwrap(),
        Money::zero(Currency::USD)
    );
    assert_eq!(
        report.total_or_default().unwrap(),
        Money::zero(Currency::DKK)
    );
}

#[test]
fn test_total_ignores_default_currency_when_not_empty() {
    let mut report = valid_report();
    report.add_stock_movement(movement(3, 10, Currency::EUR, 0));

    assert_eq!(
        report.total(Currency::USD).unwrap(),
        Money::new(dec!(30), Currency::EUR)
    );
}

#[test]
fn test_total_uses_oldest_movement_currency() {
    let mut report = valid_report();
    report
        .add_stock_movement(movement(1, 10, Currency::SEK, 10))
        .add_stock_movement(movement(1, 10, Currency::DKK, 0));

    // The DKK movement is older, so the SEK one is the mismatch.
    let err = report.total(Currency::USD).unwrap_err();
    assert_eq!(
        err,
        MoneyError::CurrencyMismatch {
            expected: Currency::DKK,
            found: Currency::SEK,
        }
    );
    assert!(ReportError::from(err).is_currency_mismatch());
}

#[test]
fn test_total_overflow_is_an_error() {
    let huge = Money::new(rust_decimal::Decimal::MAX, Currency::DKK);
    let mut report = valid_report();
    report
        .add_stock_movement(StockMovement::new(StockMovementId::new(), 1, huge, at(0)).unwrap())
        .add_stock_movement(StockMovement::new(StockMovementId::new(), 1, huge, at(1)).unwrap());

    assert_eq!(
        report.total(Currency::DKK),
        Err(MoneyError::Overflow {
            currency: Currency::DKK
        })
    );
}

#[test]
fn test_total_has_no_side_effects() {
    let mut report = valid_report();
    report.add_stock_movement(dkk(1, 100));
    let before = report.clone();

    let _ = report.total_or_default();

    assert_eq!(report, before);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_requires_manufacturer() {
    let err = Report::default().validate().unwrap_err();
    assert_eq!(err.field, "manufacturer");
}

#[test]
fn test_validate_file_length() {
    let mut report = valid_report();
    report.set_file("a".repeat(MAX_FILE_LENGTH)).unwrap();
    report.validate().unwrap();

    report.set_file("a".repeat(MAX_FILE_LENGTH + 1)).unwrap();
    let err = report.validate().unwrap_err();
    assert_eq!(err.field, "file");
    assert_eq!(
        err.to_string(),
        "Invalid file: must be at most 191 characters, got 192"
    );
}

#[test]
fn test_validate_file_length_counts_characters() {
    let mut report = valid_report();
    report.set_file("ø".repeat(MAX_FILE_LENGTH)).unwrap();
    report.validate().unwrap();
}

#[test]
fn test_restore_sorts_and_validates() {
    let later = movement(1, 5, Currency::DKK, 9);
    let earlier = movement(1, 5, Currency::DKK, 1);
    let stored = StoredReport {
        id: ReportId::new(),
        manufacturer: ManufacturerId::new(),
        status: ReportStatus::Error,
        error: Some("timeout".to_string()),
        file: None,
        stock_movements: vec![later.clone(), earlier.clone()],
        created_at: at(0),
        updated_at: at(1),
    };

    let report = Report::restore(stored.clone()).unwrap();
    assert_eq!(report.id(), Some(stored.id));
    assert_eq!(report.error(), Some("timeout"));
    assert_eq!(report.stock_movements(), &[earlier, later]);
    assert_eq!(report.created_at(), Some(at(0)));

    let inconsistent = StoredReport {
        status: ReportStatus::Successful,
        ..stored
    };
    let err = Report::restore(inconsistent).unwrap_err();
    assert_eq!(err.field, "error");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Read order is ascending creation time whatever the insertion order.
    #[test]
    fn prop_movements_sorted_by_creation(minutes in prop::collection::vec(0i64..10_000, 0..30)) {
        let mut report = valid_report();
        for minute in &minutes {
            report.add_stock_movement(movement(1, 1, Currency::DKK, *minute));
        }

        prop_assert_eq!(report.stock_movement_count(), minutes.len());
        let times: Vec<_> = report.stock_movements().iter().map(StockMovement::created_at).collect();
        prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Adding movements any number of times keeps one reference each.
    #[test]
    fn prop_add_is_idempotent(count in 1usize..10, repeats in 1usize..4) {
        let movements: Vec<_> = (0..count).map(|i| dkk(1, i64::try_from(i).unwrap())).collect();
        let mut report = valid_report();
        for _ in 0..repeats {
            report.set_stock_movements(movements.clone());
        }

        prop_assert_eq!(report.stock_movement_count(), count);
        prop_assert!(report.validate().is_ok());
    }

    /// The total is the sum of precomputed movement totals.
    #[test]
    fn prop_total_is_sum_of_movement_totals(
        lines in prop::collection::vec((-50i32..50, 0i64..100_000), 1..20),
    ) {
        let mut report = valid_report();
        for (minute, (quantity, price)) in (0i64..).zip(&lines) {
            report.add_stock_movement(movement(*quantity, *price, Currency::EUR, minute));
        }

        let expected: i64 = lines.iter().map(|(q, p)| i64::from(*q) * p).sum();
        let total = report.total(Currency::DKK).unwrap();
        prop_assert_eq!(total, Money::new(expected.into(), Currency::EUR));
    }
}
