use crate::{encode, QifRenderer, Renderer, Writer, WriterConfig};
use chrono::NaiveDate;
use indoc::indoc;
use qif_core::{DateFormat, Split, Status, Transaction};
use qif_parser::{Reader, ReaderConfig};
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_conversion(s: &str) -> anyhow::Result<()> {
    // First read the transactions
    let transactions = Reader::from_text(s)?.into_transactions();

    // Now write them
    let rendered = Writer::scoped(Vec::new(), WriterConfig::default(), |w| {
        for transaction in &transactions {
            w.append(transaction.clone());
        }
    })?;
    let rendered = String::from_utf8(rendered)?;

    // Read again
    let transactions_2 = Reader::from_text(rendered.as_str())?.into_transactions();
    assert_eq!(transactions_2, transactions);

    // Write again to test for equality
    let rendered_2 = Writer::scoped(Vec::new(), WriterConfig::default(), |w| {
        for transaction in transactions_2 {
            w.append(transaction);
        }
    })?;
    assert_eq!(String::from_utf8(rendered_2)?, rendered);

    Ok(())
}

#[test]
fn test_encode_field_order() -> anyhow::Result<()> {
    let transaction = Transaction::builder()
        .date(date(2020, 3, 15))
        .amount(Decimal::new(-4250, 2))
        .status(Status::Cleared)
        .number("1001")
        .payee("Grocery Store")
        .memo("Weekly")
        .address("1 Main St")
        .category("Food")
        .build();
    assert_eq!(
        encode(&transaction, &DateFormat::default())?,
        "D15/03/2020\nT-42.50\nC*\nN1001\nPGrocery Store\nMWeekly\nA1 Main St\nLFood"
    );
    Ok(())
}

#[test]
fn test_encode_omits_empty_fields() -> anyhow::Result<()> {
    let transaction = Transaction::builder()
        .date(date(2020, 3, 15))
        .payee("")
        .build();
    assert_eq!(encode(&transaction, &DateFormat::default())?, "D15/03/2020");
    Ok(())
}

#[test]
fn test_encode_multi_line_values() -> anyhow::Result<()> {
    let transaction = Transaction::builder()
        .date(date(2020, 3, 15))
        .address("1 Main St\nSpringfield")
        .build();
    assert_eq!(
        encode(&transaction, &DateFormat::default())?,
        "D15/03/2020\nA1 Main St\nASpringfield"
    );
    Ok(())
}

#[test]
fn test_encode_splits() -> anyhow::Result<()> {
    let transaction = Transaction::builder()
        .date(date(2020, 3, 15))
        .amount(Decimal::new(-4250, 2))
        .splits(vec![
            Split::builder()
                .category("Groceries")
                .amount(Decimal::new(-3000, 2))
                .build(),
            Split::builder()
                .category("Household")
                .memo("Batteries")
                .amount(Decimal::new(-1250, 2))
                .build(),
        ])
        .build();
    let format: DateFormat = "yyyy-mm-dd".parse()?;
    assert_eq!(
        encode(&transaction, &format)?,
        indoc! {"
            D2020-03-15
            T-42.50
            SGroceries
            E
            $-30.00
            SHousehold
            EBatteries
            $-12.50"}
    );
    Ok(())
}

#[test]
fn test_splits_keep_their_memos() -> anyhow::Result<()> {
    let transaction = Transaction::builder()
        .date(date(2020, 3, 15))
        .amount(Decimal::new(-4250, 2))
        .splits(vec![
            Split::builder()
                .category("Groceries")
                .amount(Decimal::new(-3000, 2))
                .build(),
            Split::builder()
                .memo("Batteries")
                .amount(Decimal::new(-1250, 2))
                .build(),
            Split::builder().category("Fees").build(),
        ])
        .build();
    let rendered = Writer::scoped(Vec::new(), WriterConfig::default(), |w| {
        w.append(transaction.clone())
    })?;
    let mut reader = Reader::from_text(String::from_utf8(rendered)?)?;
    assert_eq!(reader.materialize_all(), &[transaction][..]);
    Ok(())
}

#[test]
fn test_render_split() -> anyhow::Result<()> {
    let split = Split::builder().memo("Batteries").build();
    let mut rendered = Vec::new();
    QifRenderer::default().render(&split, &mut rendered)?;
    assert_eq!(String::from_utf8(rendered)?, "EBatteries");
    Ok(())
}

#[test]
fn test_round_trip() -> anyhow::Result<()> {
    let transaction = Transaction::builder()
        .date(date(2020, 3, 15))
        .amount(Decimal::new(-4250, 2))
        .payee("Grocery Store")
        .build();
    let rendered = Writer::scoped(Vec::new(), WriterConfig::default(), |w| {
        w.append(transaction.clone())
    })?;
    let mut reader = Reader::from_text(String::from_utf8(rendered)?)?;
    assert_eq!(reader.materialize_all(), &[transaction][..]);
    Ok(())
}

#[test]
fn test_simple() -> anyhow::Result<()> {
    test_conversion(indoc! {"
        !Type:Bank
        D15/03/2020
        T-42.50
        PGrocery Store
        ^
        D16/03/2020
        T1,000.00
        CX
        N1002
        PPayroll
        LIncome:Salary
        ^
    "})?;
    Ok(())
}

#[test]
fn test_multi_line_memo() -> anyhow::Result<()> {
    test_conversion(indoc! {"
        !Type:Cash
        D15/03/2020
        MFirst line
        MSecond line
        ^
    "})?;
    Ok(())
}

#[test]
fn test_splits() -> anyhow::Result<()> {
    test_conversion(indoc! {"
        !Type:CCard
        D15/03/2020
        T-42.50
        SGroceries
        EFood
        $-30.00
        SHousehold
        EBatteries
        $-12.50
        ^
    "})?;
    Ok(())
}

#[test]
fn test_file_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("export.qif");
    let config = WriterConfig::builder()
        .account_type("Oth A")
        .date_format("mm/dd/yyyy".parse()?)
        .build();
    let transactions = vec![
        Transaction::builder()
            .date(date(2020, 1, 2))
            .amount(Decimal::new(250000, 2))
            .payee("Car")
            .build(),
        Transaction::builder()
            .date(date(2020, 12, 31))
            .amount(Decimal::new(-10000, 2))
            .memo("Depreciation")
            .build(),
    ];

    Writer::open(&path, config, |w| {
        for transaction in &transactions {
            w.append(transaction.clone());
        }
    })?;

    let mut reader = Reader::open(&path, ReaderConfig::default())?;
    assert_eq!(reader.header().line, "!Type:Oth A");
    assert_eq!(reader.date_format().tag(), "mm/dd/yyyy");
    assert_eq!(reader.materialize_all(), &transactions[..]);
    Ok(())
}

#[test]
fn test_create_overwrites() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("export.qif");
    std::fs::write(&path, "old contents that are longer than the new ones")?;

    let mut writer = Writer::create(&path, WriterConfig::default())?;
    writer.flush()?;
    drop(writer.close());
    assert_eq!(std::fs::read_to_string(&path)?, "!Type:Bank\n");
    Ok(())
}
