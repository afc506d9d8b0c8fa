//! Reading real xlsx workbooks from memory: sheet selection and read failures

use commute_lib::test_utils::{COMMUTING_TEST_ROUTE, serial_for_day};
use commute_lib::{CommuteError, CommuteValidator, Verdict, validate_bytes};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

/// Header plus `business` business trips followed by `commuting` commuting trips,
/// in the claim form layout (flag in B, amount in K)
fn fill_claim_sheet(
    worksheet: &mut Worksheet,
    business: u32,
    commuting: u32,
) -> Result<(), XlsxError> {
    worksheet.write_string(0, 1, "No.")?;
    worksheet.write_string(0, 2, "日付")?;
    worksheet.write_string(0, 10, "金額")?;

    for index in 0..business + commuting {
        let row = index + 1;
        let (boarding, alighting, trip_type, expense, destination, transport, amount) =
            if index < business {
                ("東京", "横浜", "片道", "業務", "取引先", "電車", 480.0)
            } else {
                COMMUTING_TEST_ROUTE
            };
        worksheet.write_number(row, 1, 1.0)?;
        worksheet.write_number(row, 2, serial_for_day(row))?;
        worksheet.write_string(row, 3, boarding)?;
        worksheet.write_string(row, 5, alighting)?;
        worksheet.write_string(row, 6, trip_type)?;
        worksheet.write_string(row, 7, expense)?;
        worksheet.write_string(row, 8, destination)?;
        worksheet.write_string(row, 9, transport)?;
        worksheet.write_number(row, 10, amount)?;
    }

    Ok(())
}

/// First sheet "Sheet1" holds business trips only; second sheet "交通費" holds the claim
fn two_sheet_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    fill_claim_sheet(workbook.add_worksheet(), 6, 0).unwrap();
    let claims = workbook.add_worksheet();
    claims.set_name("交通費").unwrap();
    fill_claim_sheet(claims, 2, 4).unwrap();
    workbook.save_to_buffer().unwrap()
}

fn validator_for_sheet(sheet_name: Option<&str>) -> CommuteValidator {
    CommuteValidator::builder()
        .sheet_name(sheet_name)
        .errors_log(None)
        .build()
        .unwrap()
}

#[test]
fn test_first_sheet_is_read_by_default() {
    let mut workbook = Workbook::new();
    fill_claim_sheet(workbook.add_worksheet(), 2, 4).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let result = validate_bytes("a.xlsx", bytes, &validator_for_sheet(None)).unwrap();
    assert_eq!(result.name(), "a.xlsx");
    assert_eq!(result.records().len(), 6);
    assert_eq!(result.routes().len(), 1);
    assert_eq!(result.status(), Verdict::Acceptable);
    assert_eq!(result.records()[0].row_number, 2);
}

#[test]
fn test_first_sheet_wins_over_later_sheets() {
    let result = validate_bytes("b.xlsx", two_sheet_workbook(), &validator_for_sheet(None)).unwrap();

    // Sheet1 has no commuting rows at all
    assert_eq!(result.records().len(), 6);
    assert_eq!(result.status(), Verdict::Problem);
}

#[test]
fn test_named_second_sheet_is_selected() {
    let result = validate_bytes(
        "b.xlsx",
        two_sheet_workbook(),
        &validator_for_sheet(Some("交通費")),
    )
    .unwrap();

    assert_eq!(result.records().len(), 6);
    assert_eq!(result.routes()[0].len(), 4);
    assert_eq!(result.status(), Verdict::Acceptable);
}

#[test]
fn test_missing_sheet_name_is_unreadable() {
    let err = validate_bytes(
        "c.xlsx",
        two_sheet_workbook(),
        &validator_for_sheet(Some("nope")),
    )
    .unwrap_err();

    match err {
        CommuteError::SourceUnreadable { name, message } => {
            assert_eq!(name, "c.xlsx");
            assert!(message.contains("Error reading sheet 'nope'"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
