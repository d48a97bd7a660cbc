//! Message codec for the MCP stdio transport.
//!
//! Frame format: one JSON-RPC message per line, UTF-8, terminated by `\n`.
//! Messages must not contain embedded newlines.

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Read one message line from the stream.
///
/// Blank lines are skipped. Returns `None` on clean EOF. `max_message_bytes`
/// caps the accepted line length.
///
/// A line that is too long or not UTF-8 yields an `InvalidData` error. The
/// whole offending line has been consumed by then, so the next call starts
/// at the following message.
pub async fn read_message<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    max_message_bytes: usize,
) -> std::io::Result<Option<String>> {
    loop {
        let mut buf = Vec::new();
        let limit = max_message_bytes as u64 + 1;
        let read = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;
        if read == 0 {
            return Ok(None);
        }

        if buf.len() > max_message_bytes && buf.last() != Some(&b'\n') {
            discard_line(reader).await?;
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Message too large: more than {} bytes", max_message_bytes),
            ));
        }

        let line = String::from_utf8(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.trim().is_empty() {
            continue;
        }
        return Ok(Some(trimmed.to_string()));
    }
}

/// Skip the rest of the current line, up to and including its `\n`.
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let (found, used) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => (true, pos + 1),
                None => (false, available.len()),
            }
        };
        reader.consume(used);
        if found {
            return Ok(());
        }
    }
}

/// Write one message as a single line and flush.
pub async fn write_message<W, T>(writer: &mut W, message: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize + ?Sized,
{
    let mut bytes = serde_json::to_vec(message)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_read_messages_until_eof() {
        let mut input: &[u8] = b"{\"a\":1}\n\n  \r\n{\"b\":2}\r\n";
        assert_eq!(
            read_message(&mut input, 1024).await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(
            read_message(&mut input, 1024).await.unwrap().as_deref(),
            Some("{\"b\":2}")
        );
        assert_eq!(read_message(&mut input, 1024).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let mut input: &[u8] = b"{\"a\":1}";
        assert_eq!(
            read_message(&mut input, 1024).await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(read_message(&mut input, 1024).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_oversized_message_rejected() {
        let mut input: &[u8] = b"{\"payload\":\"0123456789\"}\n";
        let err = read_message(&mut input, 8).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_oversized_message_skipped_to_next_line() {
        let long = format!("{{\"payload\":\"{}\"}}\n{{\"b\":2}}\n", "x".repeat(100));
        let mut input: &[u8] = long.as_bytes();
        let err = read_message(&mut input, 16).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert_eq!(
            read_message(&mut input, 16).await.unwrap().as_deref(),
            Some("{\"b\":2}")
        );
        assert_eq!(read_message(&mut input, 16).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_consumes_line() {
        let mut input: &[u8] = b"{\"a\":\"\xff\"}\n{\"b\":2}\n";
        let err = read_message(&mut input, 1024).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert_eq!(
            read_message(&mut input, 1024).await.unwrap().as_deref(),
            Some("{\"b\":2}")
        );
    }

    #[tokio::test]
    async fn test_message_exactly_at_limit_accepted() {
        let mut input: &[u8] = b"12345678\n";
        assert_eq!(
            read_message(&mut input, 8).await.unwrap().as_deref(),
            Some("12345678")
        );
    }

    #[tokio::test]
    async fn test_write_message_appends_newline() {
        let mut out: Vec<u8> = Vec::new();
        write_message(&mut out, &json!({"jsonrpc": "2.0", "id": 1, "result": {}}))
            .await
            .unwrap();
        assert_eq!(out.last(), Some(&b'\n'));
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["id"], json!(1));
    }
}
