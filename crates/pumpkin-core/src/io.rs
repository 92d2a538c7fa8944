//! Tab-separated closure and annotation readers.
//!
//! Both formats share one row grammar: the first two tab-separated columns
//! are used, extra columns are ignored, blank lines and lines starting with
//! `#` are skipped, fields may be wrapped in double quotes, and OBO PURL IRIs
//! (`<http://purl.obolibrary.org/obo/HP_0000001>`) are turned into curies.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::{debug, instrument};

use crate::Annotations;
use crate::error::{PumpkinError, Result};

const OBO_PURL: &str = "http://purl.obolibrary.org/obo/";

/// Read `(child, ancestor)` rows.
///
/// # Errors
///
/// Returns [`PumpkinError::MalformedRow`] for rows with fewer than two
/// columns and [`PumpkinError::Read`] when the reader fails.
pub fn read_closures<R: BufRead>(reader: R) -> Result<Vec<(String, String)>> {
    let mut edges = Vec::new();
    for_each_pair(reader, |child, ancestor| edges.push((child, ancestor)))?;
    Ok(edges)
}

/// Read `(entity, term)` rows grouped by entity.
///
/// # Errors
///
/// Same as [`read_closures`].
pub fn read_annotations<R: BufRead>(reader: R) -> Result<Annotations> {
    let mut annotations = Annotations::new();
    for_each_pair(reader, |entity, term| {
        annotations.entry(entity).or_default().insert(term);
    })?;
    Ok(annotations)
}

/// Open `path` for buffered reading, decompressing `*.gz` files.
///
/// # Errors
///
/// Returns [`PumpkinError::Io`] when the file cannot be opened.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| PumpkinError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_gzip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    if is_gzip {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read a closure file from disk.
///
/// # Errors
///
/// See [`open_reader`] and [`read_closures`].
#[instrument]
pub fn load_closures(path: &Path) -> Result<Vec<(String, String)>> {
    let edges = read_closures(open_reader(path)?)?;
    debug!(edges = edges.len(), "closures loaded");
    Ok(edges)
}

/// Read an annotation file from disk.
///
/// # Errors
///
/// See [`open_reader`] and [`read_annotations`].
#[instrument]
pub fn load_annotations(path: &Path) -> Result<Annotations> {
    let annotations = read_annotations(open_reader(path)?)?;
    debug!(entities = annotations.len(), "annotations loaded");
    Ok(annotations)
}

/// `<http://purl.obolibrary.org/obo/HP_0000001>` → `HP:0000001`.
///
/// Anything that is not an OBO PURL is returned as is.
#[must_use]
pub fn iri_to_curie(value: &str) -> String {
    let inner = value
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(value);
    match inner.strip_prefix(OBO_PURL) {
        Some(local) => local.replacen('_', ":", 1),
        None => inner.to_string(),
    }
}

fn for_each_pair<R, F>(reader: R, mut row: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(String, String),
{
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| PumpkinError::Read {
            line: line_no,
            source,
        })?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = trimmed.split('\t').map(clean_field);
        match (fields.next(), fields.next()) {
            (Some(first), Some(second)) if !first.is_empty() && !second.is_empty() => {
                row(first, second);
            }
            _ => {
                return Err(PumpkinError::MalformedRow {
                    line: line_no,
                    content: trimmed.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn clean_field(raw: &str) -> String {
    let field = raw.trim();
    let field = field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(field);
    iri_to_curie(field)
}
