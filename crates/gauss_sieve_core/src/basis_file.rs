//! Basis file I/O
//!
//! Reads and writes the bracketed/whitespace-delimited text format, e.g.
//!
//! ```text
//! [[2 0]
//! [0 2]
//! ]
//! ```
//!
//! Parsing is deliberately forgiving: any run of sign/digit characters on a
//! line is taken as one entry, blank lines are skipped, a lone `]` ends the
//! matrix, and rows whose width disagrees with the first row are dropped.
//! Malformed input (no usable rows, unparsable integer) is the one fatal
//! error in the system.

use num_bigint::BigInt;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::basis::LatticeBasis;

#[derive(Debug, Error)]
pub enum BasisFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input contains no numeric rows")]
    Empty,

    #[error("invalid integer {text:?}")]
    BadInteger { text: String },

    #[error("basis has {rows} rows but only {cols} columns")]
    TooManyRows { rows: usize, cols: usize },
}

/// Parse a basis from bracketed/whitespace text
pub fn parse_basis(text: &str) -> Result<LatticeBasis, BasisFileError> {
    let mut rows: Vec<Vec<BigInt>> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "]" {
            break;
        }

        let mut row: Vec<BigInt> = Vec::new();
        let mut token = String::new();
        for ch in line.chars() {
            if ch.is_ascii_digit() || ch == '-' || ch == '+' {
                token.push(ch);
            } else if !token.is_empty() {
                row.push(parse_entry(&token)?);
                token.clear();
            }
        }
        if !token.is_empty() {
            row.push(parse_entry(&token)?);
        }

        if !row.is_empty() {
            if !rows.is_empty() && row.len() != rows[0].len() {
                continue; // width mismatch: drop the row
            }
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(BasisFileError::Empty);
    }
    let (n, d) = (rows.len(), rows[0].len());
    if n > d {
        return Err(BasisFileError::TooManyRows { rows: n, cols: d });
    }

    Ok(LatticeBasis::new(rows))
}

fn parse_entry(token: &str) -> Result<BigInt, BasisFileError> {
    token.parse::<BigInt>().map_err(|_| BasisFileError::BadInteger {
        text: token.to_string(),
    })
}

/// Read a basis from a file
pub fn read_basis<P: AsRef<Path>>(path: P) -> Result<LatticeBasis, BasisFileError> {
    let text = fs::read_to_string(path)?;
    parse_basis(&text)
}

/// Format a vector in the bracketed convention: `[a b c]`
pub fn format_vector(v: &[BigInt]) -> String {
    let entries: Vec<String> = v.iter().map(|x| x.to_string()).collect();
    format!("[{}]", entries.join(" "))
}

/// Write a basis in the bracketed convention
pub fn write_basis<P: AsRef<Path>>(basis: &LatticeBasis, path: P) -> Result<(), BasisFileError> {
    let mut out = fs::File::create(path)?;
    writeln!(out, "[")?;
    for i in 0..basis.n {
        writeln!(out, "{}", format_vector(basis.get(i)))?;
    }
    writeln!(out, "]")?;
    Ok(())
}

/// Write a single vector in the bracketed convention
pub fn write_vector<P: AsRef<Path>>(v: &[BigInt], path: P) -> Result<(), BasisFileError> {
    let mut out = fs::File::create(path)?;
    writeln!(out, "{}", format_vector(v))?;
    Ok(())
}
