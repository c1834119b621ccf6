//! # Antimail
//!
//! Antimail accepts a connection, speaks just enough SMTP to take one
//! message off it, and hands back the envelope.
//!
//! ## Quick Start
//!
//! ```rust
//! use antimail::SmtpSession;
//!
//! let input = b"EHLO client\r\n\
//!     MAIL FROM:<a@b>\r\n\
//!     RCPT TO:<c@d>\r\n\
//!     DATA\r\n\
//!     hello\r\n\
//!     .\r\n\
//!     QUIT\r\n";
//! let mut output: Vec<u8> = Vec::new();
//!
//! let envelope = SmtpSession::new(&input[..], &mut output)
//!     .run()
//!     .unwrap()
//!     .expect("session ended with QUIT");
//!
//! assert_eq!(envelope.sender, "a@b");
//! assert_eq!(envelope.recipient, "c@d");
//! assert_eq!(envelope.body.as_deref(), Some(&b"hello\r\n"[..]));
//! ```
//!
//! To serve real clients, run an [`SmtpServer`]; it handles every connection
//! on its own thread and sends finished envelopes to a channel.
//!
//! ## Supported SMTP commands
//!
//! - `EHLO` / `HELO` - Greet the server
//! - `MAIL FROM:<addr>` - Set the sender (the last one wins)
//! - `RCPT TO:<addr>` - Set the recipient (the last one wins)
//! - `DATA` - Send the message body, ended by a line holding a single `.`
//! - `QUIT` - End the session and return the envelope
//!
//! ## Notes
//!
//! - Commands may arrive in any order.
//! - Any other verb, an empty line, or a malformed address ends the session
//!   without a reply.
//! - Message bodies are capped at 10,240,000 bytes.
//! - Authentication, TLS, pipelining and delivery are not supported.

mod smtp;

pub use smtp::{
    Command, Envelope, SmtpError, SmtpLimits, SmtpResponse, SmtpServer, SmtpSession, SmtpState,
    Verb,
};
