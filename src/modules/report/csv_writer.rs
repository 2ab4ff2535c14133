use super::record::MatchRecord;
use crate::modules::lookup::MatchResult;
use crate::shared::errors::AppResult;
use log::info;
use std::io;
use std::path::Path;

/// Write one CSV row per result, header first, in the order given
pub fn write_results<W: io::Write>(writer: W, results: &[MatchResult]) -> AppResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(MatchRecord::HEADERS)?;
    for result in results {
        csv.serialize(MatchRecord::from(result))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_results_to_path(path: &Path, results: &[MatchResult]) -> AppResult<()> {
    let file = std::fs::File::create(path)?;
    write_results(file, results)?;
    info!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}
