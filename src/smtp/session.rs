//! SMTP session engine

use std::io::{BufReader, BufWriter, Read, Write};

use tracing::{debug, info};

use crate::smtp::commands::{Command, Verb};
use crate::smtp::data;
use crate::smtp::envelope::Envelope;
use crate::smtp::error::{SmtpError, SmtpLimits};
use crate::smtp::response::SmtpResponse;

/// Represents the current state of an SMTP session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpState {
    /// Nothing processed yet, greeting not sent
    Greeting,
    /// Accepting commands
    Active,
    /// Reading a message body after DATA
    DataCollection,
    /// QUIT seen or a handler failed
    Terminated,
}

/// Drives one connection from greeting to termination
///
/// Reads and writes go through a single buffered reader and a single buffered
/// writer, and every reply is flushed before the next line is read.
#[derive(Debug)]
pub struct SmtpSession<R, W: Write> {
    envelope: Envelope,
    state: SmtpState,
    hostname: String,
    reader: BufReader<R>,
    writer: BufWriter<W>,
}

impl<R: Read, W: Write> SmtpSession<R, W> {
    /// Create a new session over the read and write halves of a connection
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_hostname("localhost", reader, writer)
    }

    /// Create a new session that names `hostname` in its greeting
    pub fn with_hostname(hostname: &str, reader: R, writer: W) -> Self {
        Self {
            envelope: Envelope::default(),
            state: SmtpState::Greeting,
            hostname: hostname.to_owned(),
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
        }
    }

    /// Where the session is in its lifecycle
    pub fn state(&self) -> SmtpState {
        self.state
    }

    /// The envelope collected so far
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Run the session until QUIT, a failure, or the end of the stream
    ///
    /// Returns `Ok(Some(envelope))` after QUIT, `Err` as soon as any handler
    /// fails, and `Ok(None)` when the peer closes the stream without QUIT.
    pub fn run(&mut self) -> Result<Option<Envelope>, SmtpError> {
        let result = self.serve();
        if result.is_err() {
            self.state = SmtpState::Terminated;
        }
        result
    }

    fn serve(&mut self) -> Result<Option<Envelope>, SmtpError> {
        self.reply(&SmtpResponse::greeting(&self.hostname))?;
        self.state = SmtpState::Active;

        let mut line = Vec::new();
        while data::read_line(&mut self.reader, &mut line)? {
            let line = String::from_utf8_lossy(&line);
            debug!("<- {line}");

            self.handle(&line)?;

            if self.state == SmtpState::Terminated {
                return Ok(Some(std::mem::take(&mut self.envelope)));
            }
        }

        Ok(None)
    }

    /// Tokenize one command line and dispatch it to its handler
    fn handle(&mut self, line: &str) -> Result<(), SmtpError> {
        let command = Command::parse(line)?;

        match command.resolve()? {
            Verb::Hello => self.handle_hello(),
            Verb::Mail => self.handle_mail(&command),
            Verb::Rcpt => self.handle_rcpt(&command),
            Verb::Data => self.handle_data(),
            Verb::Quit => self.handle_quit(),
        }
    }

    fn handle_hello(&mut self) -> Result<(), SmtpError> {
        self.reply(&SmtpResponse::hello())
    }

    fn handle_mail(&mut self, command: &Command) -> Result<(), SmtpError> {
        self.envelope.sender = command.address()?;
        self.reply(&SmtpResponse::go_ahead())
    }

    fn handle_rcpt(&mut self, command: &Command) -> Result<(), SmtpError> {
        self.envelope.recipient = command.address()?;
        self.reply(&SmtpResponse::go_ahead())
    }

    /// Run the DATA sub-protocol on the same reader the commands come from
    fn handle_data(&mut self) -> Result<(), SmtpError> {
        self.reply(&SmtpResponse::data_start())?;
        self.state = SmtpState::DataCollection;

        let body = data::read_body(&mut self.reader, SmtpLimits::MAX_DATA_SIZE)?;
        info!(
            sender = %self.envelope.sender,
            recipient = %self.envelope.recipient,
            size = body.len(),
            "message received"
        );
        debug!("->\n{}", String::from_utf8_lossy(&body));
        self.envelope.body = Some(body);
        self.state = SmtpState::Active;

        self.reply(&SmtpResponse::data_accepted())
    }

    fn handle_quit(&mut self) -> Result<(), SmtpError> {
        let result = self.reply(&SmtpResponse::quit());
        self.state = SmtpState::Terminated;
        result
    }

    /// Write a reply and flush it to the peer
    fn reply(&mut self, response: &SmtpResponse) -> Result<(), SmtpError> {
        debug_assert!(
            response.is_success() || response.is_intermediate(),
            "sessions never send negative replies: {response:?}"
        );
        let line = response.format();
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        debug!("-> {}", line.trim_end());
        Ok(())
    }
}
