//! Line-delimited JSON reader for the server stream.
//!
//! Each call pulls exactly one line and parses it as one JSON value. A parsed
//! `null` is a valid message; failures are reported through [`ReadError`] so
//! callers never confuse "bad input" with a data value.

use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{trace, warn};

/// Why a message could not be produced.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("input stream closed")]
    Closed,

    #[error("failed to read from input stream")]
    Io(#[source] std::io::Error),

    #[error("line {line} is not valid JSON")]
    Parse {
        line: u64,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads one JSON value per line from an async buffered source.
#[derive(Debug)]
pub struct MessageReader<R> {
    reader: R,
    /// Reused line buffer; holds only the in-flight line.
    line: String,
    lines_read: u64,
}

impl<R> MessageReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            lines_read: 0,
        }
    }

    /// Reads and parses the next line.
    ///
    /// # Errors
    ///
    /// - `Closed` at end of stream
    /// - `Io` if the underlying read fails
    /// - `Parse` if the line is not a single JSON value (an empty line included)
    pub async fn next_message(&mut self) -> Result<Value, ReadError> {
        self.line.clear();

        let bytes = self
            .reader
            .read_line(&mut self.line)
            .await
            .map_err(ReadError::Io)?;
        if bytes == 0 {
            return Err(ReadError::Closed);
        }
        self.lines_read += 1;

        let text = self.line.trim_end_matches(['\n', '\r']);
        trace!(line = self.lines_read, bytes, "received message");

        serde_json::from_str(text).map_err(|source| {
            warn!(line = self.lines_read, error = %source, "discarding unparsable message");
            ReadError::Parse {
                line: self.lines_read,
                source,
            }
        })
    }

    /// Number of lines consumed so far, including unparsable ones.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn reads_one_value_per_line() {
        let input: &[u8] = b"{\"a\":1}\n\"END\"\n42\r\n";
        let mut reader = MessageReader::new(input);

        assert_eq!(reader.next_message().await.unwrap(), json!({"a": 1}));
        assert_eq!(reader.next_message().await.unwrap(), json!("END"));
        assert_eq!(reader.next_message().await.unwrap(), json!(42));
        assert!(matches!(
            reader.next_message().await,
            Err(ReadError::Closed)
        ));
        assert_eq!(reader.lines_read(), 3);
    }

    #[tokio::test]
    async fn null_is_a_message_not_a_failure() {
        let input: &[u8] = b"null\n";
        let mut reader = MessageReader::new(input);

        assert_eq!(reader.next_message().await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn last_line_without_newline_is_read() {
        let input: &[u8] = b"\"END_INIT\"";
        let mut reader = MessageReader::new(input);

        assert_eq!(reader.next_message().await.unwrap(), json!("END_INIT"));
        assert!(matches!(
            reader.next_message().await,
            Err(ReadError::Closed)
        ));
    }

    #[tokio::test]
    async fn malformed_line_reports_its_number() {
        let input: &[u8] = b"{}\n{not json\n{}\n";
        let mut reader = MessageReader::new(input);

        reader.next_message().await.unwrap();
        match reader.next_message().await {
            Err(ReadError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
        // The stream stays usable after a bad line.
        assert_eq!(reader.next_message().await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn empty_line_is_a_parse_failure() {
        let input: &[u8] = b"\n";
        let mut reader = MessageReader::new(input);

        assert!(matches!(
            reader.next_message().await,
            Err(ReadError::Parse { line: 1, .. })
        ));
    }
}
