//! JSON export

use crate::output::OutputResult;
use crate::ScrapedItem;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes items to a pretty-printed JSON array
pub fn write_json(items: &[ScrapedItem], path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, items)?;
    writer.flush()?;
    Ok(())
}
