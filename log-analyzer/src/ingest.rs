use std::io::{self, BufRead, Lines};

use thiserror::Error;

use crate::models::LogRecord;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("malformed record on line {line}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Streams records out of a JSON-lines reader, one line at a time.
pub struct Records<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<LogRecord, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lines.next()?;
            self.line += 1;
            let line = self.line;
            let raw = match raw {
                Ok(raw) => raw,
                Err(source) => return Some(Err(IngestError::Read { line, source })),
            };
            if raw.trim().is_empty() {
                continue;
            }
            return Some(
                serde_json::from_str(&raw)
                    .map_err(|source| IngestError::Malformed { line, source }),
            );
        }
    }
}
