//! Input loaders for the command-line front end
//!
//! Graphs come from CSV files with a header row and `origin,destination,weight`
//! columns; Huffman input is any UTF-8 text file. Nothing in the algorithm
//! modules depends on this one.

use crate::error::{EngineError, Result};
use crate::graph::{build_graph, Graph};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// One parsed CSV row.
pub type EdgeRow = (String, String, f64);

/// Parses edge rows from any reader.
///
/// The first line is a header and is ignored. Fields are trimmed. Rows with
/// fewer than three fields are skipped with a warning; a weight that is not a
/// number aborts loading with [`EngineError::MalformedEdge`].
pub fn parse_graph_csv<R: Read>(reader: R) -> Result<Vec<EdgeRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() < 3 {
            warn!(line, fields = record.len(), "skipping short CSV row");
            continue;
        }

        let origin = record[0].to_string();
        let destination = record[1].to_string();
        let raw = &record[2];
        let weight: f64 = raw.parse().map_err(|_| EngineError::MalformedEdge {
            origin: format!("{origin:?}"),
            destination: format!("{destination:?}"),
            reason: format!("line {line}: weight {raw:?} is not a number"),
        })?;
        rows.push((origin, destination, weight));
    }
    Ok(rows)
}

/// Reads edge rows from a CSV file.
pub fn read_graph_csv<P: AsRef<Path>>(path: P) -> Result<Vec<EdgeRow>> {
    let file = std::fs::File::open(path.as_ref())?;
    parse_graph_csv(file)
}

/// Reads a CSV file straight into a [`Graph`].
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Graph<String>> {
    let rows = read_graph_csv(path.as_ref())?;
    tracing::info!(path = %path.as_ref().display(), rows = rows.len(), "loaded edge list");
    build_graph(rows)
}

/// Reads a whole text file for Huffman coding.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
