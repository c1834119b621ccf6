//! Command line tokenizing and address extraction

use crate::smtp::error::SmtpError;

/// The command verbs a session recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `EHLO` or `HELO`
    Hello,
    Mail,
    Rcpt,
    Data,
    Quit,
}

impl Verb {
    /// Look up an upper-cased verb token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "EHLO" | "HELO" => Some(Verb::Hello),
            "MAIL" => Some(Verb::Mail),
            "RCPT" => Some(Verb::Rcpt),
            "DATA" => Some(Verb::Data),
            "QUIT" => Some(Verb::Quit),
            _ => None,
        }
    }
}

/// One tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// First token, upper-cased
    pub verb: String,
    /// Remaining tokens in their original case
    pub arguments: Vec<String>,
}

impl Command {
    /// Split a command line (without its terminator) into verb and arguments
    pub fn parse(line: &str) -> Result<Self, SmtpError> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or(SmtpError::MalformedCommand)?;

        Ok(Self {
            verb: verb.to_uppercase(),
            arguments: tokens.map(str::to_owned).collect(),
        })
    }

    /// Resolve the verb against the recognized set
    pub fn resolve(&self) -> Result<Verb, SmtpError> {
        Verb::from_token(&self.verb).ok_or_else(|| SmtpError::UnknownVerb {
            verb: self.verb.clone(),
            arguments: self.arguments.clone(),
        })
    }

    /// Extract the address carried by the first argument (`FROM:<addr>`, `TO:<addr>`)
    pub fn address(&self) -> Result<String, SmtpError> {
        let argument = self.arguments.first().ok_or_else(|| {
            SmtpError::MalformedAddress(format!("{} requires an address argument", self.verb))
        })?;

        parse_address(argument).map(str::to_owned)
    }
}

/// Pull the bare address out of a `LABEL:<address>` token
///
/// Only the brackets are checked; the address itself is returned as-is,
/// and may be empty (`FROM:<>`).
pub fn parse_address(argument: &str) -> Result<&str, SmtpError> {
    let (_, path) = argument
        .split_once(':')
        .ok_or_else(|| SmtpError::MalformedAddress(format!("missing ':' in {argument}")))?;

    path.strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .ok_or_else(|| {
            SmtpError::MalformedAddress(format!("address must be enclosed in angle brackets: {path}"))
        })
}
