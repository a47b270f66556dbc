//! Tab-separated SIF networks and one-column node lists.
//!
//! Reading is strict: every non-blank line must carry exactly the expected
//! number of tab-separated fields, leading spaces of each field are
//! dropped, and a single malformed line rejects the whole file. Quoting is
//! not interpreted.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use stream_core::EdgeRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SifError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: wrong number of fields (expected {expected}, found {found})", path.display())]
    FieldCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}:{line}: empty node identifier", path.display())]
    EmptyNode { path: PathBuf, line: usize },
}

/// Read a network file: `source<TAB>label<TAB>target` per line.
pub fn read_network(path: &Path) -> Result<Vec<EdgeRecord>, SifError> {
    let text = read_to_string(path)?;
    parse_network(&text, path)
}

/// Read a node list: one identifier per line, duplicates kept.
pub fn read_nodes(path: &Path) -> Result<Vec<String>, SifError> {
    let text = read_to_string(path)?;
    parse_nodes(&text, path)
}

/// Write edge records as `source<TAB>label<TAB>target` lines, LF-terminated,
/// in the given order.
pub fn write_network(path: &Path, records: &[EdgeRecord]) -> io::Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    for r in records {
        writeln!(out, "{}\t{}\t{}", r.source, r.label, r.target)?;
    }
    out.flush()
}

fn read_to_string(path: &Path) -> Result<String, SifError> {
    fs::read_to_string(path).map_err(|source| SifError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_network(text: &str, path: &Path) -> Result<Vec<EdgeRecord>, SifError> {
    parse_fields(text, 3, path)?
        .into_iter()
        .map(|(line, mut f)| {
            let target = f.pop().unwrap_or_default();
            let label = f.pop().unwrap_or_default();
            let source = f.pop().unwrap_or_default();
            if source.is_empty() || target.is_empty() {
                return Err(SifError::EmptyNode {
                    path: path.to_path_buf(),
                    line,
                });
            }
            Ok(EdgeRecord {
                source,
                label,
                target,
            })
        })
        .collect()
}

pub fn parse_nodes(text: &str, path: &Path) -> Result<Vec<String>, SifError> {
    parse_fields(text, 1, path)?
        .into_iter()
        .map(|(line, mut f)| {
            let node = f.pop().unwrap_or_default();
            if node.is_empty() {
                return Err(SifError::EmptyNode {
                    path: path.to_path_buf(),
                    line,
                });
            }
            Ok(node)
        })
        .collect()
}

/// Split non-blank lines into exactly `expected` fields, tagged with their
/// 1-based line number.
fn parse_fields(
    text: &str,
    expected: usize,
    path: &Path,
) -> Result<Vec<(usize, Vec<String>)>, SifError> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<String> = line
            .split('\t')
            .map(|f| f.trim_start().to_string())
            .collect();
        if fields.len() != expected {
            return Err(SifError::FieldCount {
                path: path.to_path_buf(),
                line: i + 1,
                expected,
                found: fields.len(),
            });
        }
        rows.push((i + 1, fields));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> &'static Path {
        Path::new("net.sif")
    }

    #[test]
    fn test_parse_network() {
        let records = parse_network("A\tact\tB\nB\tinh\tC\n", p()).unwrap();
        assert_eq!(
            records,
            vec![
                EdgeRecord::new("A", "act", "B"),
                EdgeRecord::new("B", "inh", "C"),
            ]
        );
    }

    #[test]
    fn test_parse_network_crlf_and_blank_lines() {
        let records = parse_network("A\tact\tB\r\n\r\n\nB\tinh\tC", p()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].target, "C");
    }

    #[test]
    fn test_parse_network_trims_leading_space() {
        let records = parse_network("  A\t act\t  B\n", p()).unwrap();
        assert_eq!(records[0], EdgeRecord::new("A", "act", "B"));
    }

    #[test]
    fn test_parse_network_wrong_field_count() {
        let err = parse_network("A\tact\tB\nB\tC\n", p()).unwrap_err();
        match err {
            SifError::FieldCount {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!((line, expected, found), (2, 3, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_network_empty_label_allowed() {
        let records = parse_network("A\t\tB\n", p()).unwrap();
        assert_eq!(records[0].label, "");
    }

    #[test]
    fn test_parse_network_empty_node_rejected() {
        let err = parse_network("\tact\tB\n", p()).unwrap_err();
        assert!(matches!(err, SifError::EmptyNode { line: 1, .. }));
    }

    #[test]
    fn test_parse_nodes() {
        let nodes = parse_nodes("D\nA\n\nD\n", Path::new("roots.txt")).unwrap();
        assert_eq!(nodes, vec!["D", "A", "D"]);
    }

    #[test]
    fn test_parse_nodes_rejects_extra_columns() {
        let err = parse_nodes("D\tE\n", Path::new("roots.txt")).unwrap_err();
        assert!(err.to_string().contains("roots.txt:1"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_network(Path::new("/nonexistent/net.sif")).unwrap_err();
        assert!(matches!(err, SifError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/net.sif"));
    }

    #[test]
    fn test_write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sif");
        let records = vec![
            EdgeRecord::new("B", "inh", "D"),
            EdgeRecord::new("A", "act", "B"),
        ];
        write_network(&path, &records).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "B\tinh\tD\nA\tact\tB\n");
    }
}
