//! CSV case input, CSV verdict output, and JSON transcript export.
//!
//! Input rows carry `id,text`; an empty `text` cell becomes a record with no
//! description. Output rows carry `ID,VERDICT` with the verdict as 1 or 0.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use tribunal_contracts::{
    case::CaseRecord,
    error::{TribunalError, TribunalResult},
};

use crate::result::CaseResult;

#[derive(Debug, Deserialize)]
struct CaseRow {
    id: String,
    #[serde(default)]
    text: Option<String>,
}

/// Read case records from a CSV file with an `id,text` header.
pub fn read_cases(path: &Path) -> TribunalResult<Vec<CaseRecord>> {
    let file = fs::File::open(path).map_err(|e| TribunalError::CaseIo {
        reason: format!("failed to open case file '{}': {}", path.display(), e),
    })?;
    let cases = read_cases_from(file)?;
    info!(path = %path.display(), cases = cases.len(), "cases loaded");
    Ok(cases)
}

pub fn read_cases_from<R: Read>(reader: R) -> TribunalResult<Vec<CaseRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut cases = Vec::new();
    for (idx, row) in reader.deserialize::<CaseRow>().enumerate() {
        let row = row.map_err(|e| TribunalError::CaseIo {
            reason: format!("malformed case row {}: {}", idx + 1, e),
        })?;
        cases.push(match row.text.filter(|text| !text.is_empty()) {
            Some(text) => CaseRecord::new(row.id, text),
            None => CaseRecord::without_description(row.id),
        });
    }
    Ok(cases)
}

/// Write one `ID,VERDICT` row per result, in result order.
pub fn write_verdicts(path: &Path, results: &[CaseResult]) -> TribunalResult<()> {
    let file = fs::File::create(path).map_err(|e| TribunalError::CaseIo {
        reason: format!("failed to create verdict file '{}': {}", path.display(), e),
    })?;
    write_verdicts_to(file, results)?;
    info!(path = %path.display(), rows = results.len(), "verdicts written");
    Ok(())
}

pub fn write_verdicts_to<W: Write>(writer: W, results: &[CaseResult]) -> TribunalResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let io_err = |e: csv::Error| TribunalError::CaseIo {
        reason: format!("failed to write verdict row: {}", e),
    };

    writer.write_record(["ID", "VERDICT"]).map_err(io_err)?;
    for result in results {
        let verdict = result.verdict().as_int().to_string();
        writer
            .write_record([result.case_id.as_str(), verdict.as_str()])
            .map_err(io_err)?;
    }
    writer.flush().map_err(|e| TribunalError::CaseIo {
        reason: format!("failed to flush verdicts: {}", e),
    })
}

/// Write each kept transcript to `<dir>/<case_id>.json`.
///
/// Returns the paths written. Results without a transcript are skipped.
pub fn write_transcripts(dir: &Path, results: &[CaseResult]) -> TribunalResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| TribunalError::CaseIo {
        reason: format!("failed to create transcript directory '{}': {}", dir.display(), e),
    })?;

    let mut written = Vec::new();
    for result in results {
        let Some(transcript) = &result.transcript else {
            continue;
        };
        let path = dir.join(format!("{}.json", file_stem(&result.case_id)));
        let json = serde_json::to_vec_pretty(transcript).map_err(|e| TribunalError::CaseIo {
            reason: format!("failed to encode transcript for case {}: {}", result.case_id, e),
        })?;
        fs::write(&path, json).map_err(|e| TribunalError::CaseIo {
            reason: format!("failed to write transcript '{}': {}", path.display(), e),
        })?;
        debug!(case_id = %result.case_id, path = %path.display(), "transcript written");
        written.push(path);
    }
    Ok(written)
}

/// A case id made safe for use as a file name.
fn file_stem(case_id: &str) -> String {
    let stem: String = case_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "case".to_string()
    } else {
        stem
    }
}
