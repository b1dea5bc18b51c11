use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

use crate::error::Result;
use crate::records::ProductRecord;

/// Write all records to `path`, replacing any previous run's output.
/// The header row comes from the record's column names; there is no
/// row-index column.
pub fn write_csv(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    ::log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Incremental CSV writer: the file is created (or truncated) up front and
/// batches are flushed to disk as they arrive, so completed categories
/// survive a later fatal error.
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: WriterBuilder::new().has_headers(true).from_writer(file),
        })
    }

    /// Serialize a batch of records and flush them to disk.
    pub fn write_batch(&mut self, records: &[ProductRecord]) -> Result<()> {
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

const COLUMN_WIDTH: usize = 36;

/// Print the full result table to stdout.
pub fn print_table(records: &[ProductRecord]) {
    let header = [
        "Title",
        "Price",
        "Description",
        "Image URL",
        "Dimensions",
        "Source URL",
    ];
    println!("{}", render_row(&header));

    for record in records {
        println!(
            "{}",
            render_row(&[
                &record.title,
                &record.price,
                &record.description,
                &record.image_url,
                &record.dimensions,
                &record.source_url,
            ])
        );
    }

    println!("{} products", records.len());
}

fn render_row(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|cell| format!("{:<width$}", clip(cell), width = COLUMN_WIDTH))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Clip a cell to the column width, marking the cut with an ellipsis.
fn clip(cell: &str) -> String {
    if cell.chars().count() <= COLUMN_WIDTH {
        return cell.to_string();
    }
    let head: String = cell.chars().take(COLUMN_WIDTH - 3).collect();
    format!("{}...", head)
}
