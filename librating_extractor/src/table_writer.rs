use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::error::TableWriterError;
use super::extractor::DialTable;
use super::row::{DialRow, RatingRow};

/// A thin wrapper around a csv::Writer which knows the layout of the two output tables.
///
/// The header is always written, even if there are no rows. Records end in CRLF.
pub struct TableWriter<W: Write> {
    writer: Writer<W>,
}

impl TableWriter<File> {
    /// Create a writer for a new CSV file at path, truncating any existing file
    pub fn create(path: &Path) -> Result<Self, TableWriterError> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::CRLF)
                .from_writer(sink),
        }
    }

    /// Write the discrete ratings table
    pub fn write_ratings(&mut self, rows: &[RatingRow]) -> Result<(), TableWriterError> {
        self.writer.write_record(RatingRow::header())?;
        for row in rows {
            self.writer.write_record(row.to_record())?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Write the dial ratings table, with one time series column per sample of the longest series
    pub fn write_dial_ratings(&mut self, table: &DialTable) -> Result<(), TableWriterError> {
        self.writer.write_record(DialRow::header(table.max_samples))?;
        for row in table.rows.iter() {
            self.writer.write_record(row.to_record(table.max_samples))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the writer, returning the underlying sink
    #[cfg(test)]
    pub fn into_inner(self) -> Result<W, TableWriterError> {
        self.writer
            .into_inner()
            .map_err(|e| {
                let err = e.error();
                TableWriterError::IOError(std::io::Error::new(err.kind(), err.to_string()))
            })
    }
}
