//! Line reading over the session's shared buffered reader
//!
//! Command lines and DATA lines are both read through the same `BufRead`,
//! so bytes buffered while reading the `DATA` command line are still there
//! when the body is collected.

use std::io::{self, BufRead, Read};

use crate::smtp::error::SmtpError;

/// Read one line into `buf`, dropping its `\n` or `\r\n` terminator
///
/// Returns `false` once the stream is exhausted. A final line without a
/// terminator is still returned.
pub fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    strip_terminator(buf);
    Ok(true)
}

fn strip_terminator(buf: &mut Vec<u8>) -> bool {
    if buf.last() != Some(&b'\n') {
        return false;
    }
    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    true
}

/// Collect a message body up to the lone `.` terminator line
///
/// A leading `.` is removed from every other line that starts with one, and
/// each stored line is terminated with `\r\n`. The body may hold at most
/// `max` bytes: when it reaches `max` before the terminator arrives it is
/// truncated there and `SizeLimitExceeded` is returned.
pub fn read_body<R: BufRead>(reader: &mut R, max: usize) -> Result<Vec<u8>, SmtpError> {
    let mut body = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        // Room for whatever still fits plus a CRLF, so a terminator right
        // under the cap is still recognized.
        let limit = (max - body.len() + 2) as u64;
        let read = reader.by_ref().take(limit).read_until(b'\n', &mut line)?;
        if read == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }

        let complete = strip_terminator(&mut line);
        if !complete && (read as u64) < limit {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }

        if complete && line == b"." {
            return Ok(body);
        }

        let content = line.strip_prefix(b".").unwrap_or(&line[..]);
        body.extend_from_slice(content);
        if complete {
            body.extend_from_slice(b"\r\n");
        }

        if body.len() >= max {
            body.truncate(max);
            return Err(SmtpError::SizeLimitExceeded { max });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(input: &str, max: usize) -> Result<Vec<u8>, SmtpError> {
        read_body(&mut input.as_bytes(), max)
    }

    #[test]
    fn test_read_line_terminators() {
        let mut reader = "HELO a\r\nHELO b\nlast".as_bytes();
        let mut buf = Vec::new();

        assert!(read_line(&mut reader, &mut buf).unwrap());
        assert_eq!(buf, b"HELO a");
        assert!(read_line(&mut reader, &mut buf).unwrap());
        assert_eq!(buf, b"HELO b");
        assert!(read_line(&mut reader, &mut buf).unwrap());
        assert_eq!(buf, b"last");
        assert!(!read_line(&mut reader, &mut buf).unwrap());
    }

    #[test]
    fn test_body_lines_get_crlf() {
        assert_eq!(body("hello\r\n.\r\n", 100).unwrap(), b"hello\r\n");
        assert_eq!(body("a\nb\n.\n", 100).unwrap(), b"a\r\nb\r\n");
        assert_eq!(body("\r\n.\r\n", 100).unwrap(), b"\r\n");
        assert_eq!(body(".\r\n", 100).unwrap(), b"");
    }

    #[test]
    fn test_dot_unstuffing() {
        assert_eq!(body("..example\r\n.\r\n", 100).unwrap(), b".example\r\n");
        assert_eq!(body("...\r\n.\r\n", 100).unwrap(), b"..\r\n");
        assert_eq!(body(".x\r\n.\r\n", 100).unwrap(), b"x\r\n");
        assert_eq!(body(" .\r\n.\r\n", 100).unwrap(), b" .\r\n");
    }

    #[test]
    fn test_reader_left_after_terminator() {
        let mut reader = "hello\r\n.\r\nQUIT\r\n".as_bytes();
        assert_eq!(read_body(&mut reader, 100).unwrap(), b"hello\r\n");

        let mut buf = Vec::new();
        assert!(read_line(&mut reader, &mut buf).unwrap());
        assert_eq!(buf, b"QUIT");
    }

    #[test]
    fn test_eof_before_terminator() {
        for input in ["", "hello\r\n", "hello\r\n."] {
            match body(input, 100) {
                Err(SmtpError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
                other => panic!("unexpected result for {input:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_body_reaching_cap() {
        // 8 bytes stored exactly at a cap of 8, no terminator yet
        match read_body(&mut "abcdef\r\n.\r\n".as_bytes(), 8) {
            Err(SmtpError::SizeLimitExceeded { max }) => assert_eq!(max, 8),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_body_one_under_cap() {
        assert_eq!(body("abcde\r\n.\r\n", 8).unwrap(), b"abcde\r\n");
    }

    #[test]
    fn test_oversized_line_is_bounded() {
        let input = format!("{}\r\n.\r\n", "x".repeat(1000));
        let mut reader = input.as_bytes();
        assert!(matches!(
            read_body(&mut reader, 16),
            Err(SmtpError::SizeLimitExceeded { max: 16 })
        ));
        // no more than the cap plus a CRLF was consumed
        assert_eq!(reader.len(), input.len() - 18);
    }
}
