//! The flat grid file format.
//!
//! A `dim` x `dim` board is stored as `dim` lines of `dim` space-separated
//! `0`/`1` tokens in row-major order, trailing newline per row. There is no
//! header and no dimension metadata: writer and reader must agree on `dim`.

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FlatFileError {
    #[error("Expected {expected} cell tokens, found {found}")]
    TooFewTokens { expected: usize, found: usize },

    #[error("Invalid cell token \"{token}\" at index {index}")]
    InvalidToken { token: String, index: usize },
}

/// Encode a row-major cell buffer.
pub fn encode(cells: &[bool], dim: usize) -> String {
    let mut out = String::with_capacity(2 * dim * (dim + 1));

    for row in cells.chunks(dim) {
        for (col, &alive) in row.iter().enumerate() {
            if col > 0 {
                out.push(' ');
            }

            out.push(if alive { '1' } else { '0' });
        }

        out.push('\n');
    }

    out
}

/// Decode exactly `dim * dim` cells from `text`.
///
/// Fails fast on a short file or on any token other than `0`/`1`. Tokens
/// past the expected count are ignored, which is what makes loading a file
/// written with a larger `dim` silently misalign rather than fail.
pub fn decode(text: &str, dim: usize) -> Result<Vec<bool>, FlatFileError> {
    let expected = dim * dim;
    let mut cells = Vec::with_capacity(expected);
    let mut tokens = text.split_whitespace();

    for (index, token) in tokens.by_ref().take(expected).enumerate() {
        match token {
            "0" => cells.push(false),
            "1" => cells.push(true),
            _ => {
                return Err(FlatFileError::InvalidToken {
                    token: token.to_string(),
                    index,
                });
            }
        }
    }

    if cells.len() < expected {
        return Err(FlatFileError::TooFewTokens {
            expected,
            found: cells.len(),
        });
    }

    if tokens.next().is_some() {
        warn!("Grid file has data past {expected} cells. Ignoring");
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::FlatFileError;

    #[test]
    fn encode_rows() {
        let cells = [true, false, false, true];

        assert_eq!(super::encode(&cells, 2), "1 0\n0 1\n");
    }

    #[test]
    fn decode_rows() {
        let cells = super::decode("1 0\n0 1\n", 2).unwrap();

        assert_eq!(cells, vec![true, false, false, true]);
    }

    #[test]
    fn decode_is_whitespace_agnostic() {
        let cells = super::decode("1\t0   0\n\n1", 2).unwrap();

        assert_eq!(cells, vec![true, false, false, true]);
    }

    #[test]
    fn decode_short_input() {
        let err = super::decode("1 0 1\n", 2).unwrap_err();

        assert!(matches!(
            err,
            FlatFileError::TooFewTokens {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn decode_bad_token() {
        let err = super::decode("1 0\n2 1\n", 2).unwrap_err();

        assert!(matches!(err, FlatFileError::InvalidToken { index: 2, .. }));
    }

    #[test]
    fn decode_ignores_trailing_data() {
        let cells = super::decode("1 1\n1 1\n0 0\n", 2).unwrap();

        assert_eq!(cells, vec![true; 4]);
    }
}
