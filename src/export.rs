//! Writes a user's transactions out as CSV.

use std::io::Write;

use csv::Writer;

use crate::{Error, category::CategoryLookup, transaction::Transaction};

/// The header row of an exported CSV file.
pub const CSV_HEADER: [&str; 6] = ["Title", "Type", "Amount", "Date", "Category", "Notes"];

/// Write `transactions` to `writer` as CSV, one row per transaction in the order given.
///
/// Category names are resolved with `categories`, so a transaction whose category no longer
/// exists is exported with the same "Unknown" label the dashboard shows.
///
/// # Errors
/// Returns an [Error::CsvError] if a row could not be written.
pub fn export_transactions_csv(
    transactions: &[Transaction],
    categories: &CategoryLookup,
    writer: impl Write,
) -> Result<(), Error> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    for transaction in transactions {
        wtr.write_record([
            transaction.title.as_str(),
            transaction.transaction_type.to_string().as_str(),
            transaction.amount.to_string().as_str(),
            transaction.date.to_string().as_str(),
            categories.resolve(transaction.category_id).label(),
            transaction.notes.as_deref().unwrap_or_default(),
        ])?;
    }

    wtr.flush().map_err(|error| Error::CsvError(error.to_string()))?;

    tracing::debug!("Exported {} transactions as CSV", transactions.len());

    Ok(())
}
