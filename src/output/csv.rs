//! CSV export

use crate::output::OutputResult;
use crate::ScrapedItem;
use std::path::Path;

/// Writes items to a CSV file with a header row.
///
/// The header is written explicitly so an export with zero items is still
/// a valid CSV file. Default quoting handles embedded commas and quotes.
pub fn write_csv(items: &[ScrapedItem], path: &Path) -> OutputResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["title", "description", "url"])?;
    for item in items {
        writer.serialize(item)?;
    }
    writer.flush()?;
    Ok(())
}
