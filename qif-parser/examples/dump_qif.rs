use qif_parser::{Reader, ReaderConfig};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let filename = std::env::args().nth(1).ok_or("filename argument")?;

    let mut reader = Reader::open(filename, ReaderConfig::default())?;
    println!("{} ({})", reader.header().line, reader.date_format());
    for transaction in reader.iter() {
        dbg!(transaction);
    }
    eprintln!(
        "{} transactions, {} records skipped",
        reader.count(),
        reader.dropped_records()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    match run() {
        Err(e) => println!("Error: {}", e),
        _ => {}
    }
}
