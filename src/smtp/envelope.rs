//! The message envelope accumulated by a session

use std::borrow::Cow;

/// Sender, recipient and body collected over one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    /// Address from the most recent `MAIL FROM`
    pub sender: String,

    /// Address from the most recent `RCPT TO`
    pub recipient: String,

    /// Raw message bytes, `None` until a DATA command has been accepted
    pub body: Option<Vec<u8>>,
}

impl Envelope {
    /// The body decoded as UTF-8, with invalid sequences replaced
    pub fn body_text(&self) -> Option<Cow<'_, str>> {
        self.body.as_deref().map(String::from_utf8_lossy)
    }

    /// Get the size of the body in bytes (zero when no DATA ran)
    pub fn data_size(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }

    /// Get the subject line from the message headers (if present)
    pub fn get_subject(&self) -> Option<String> {
        let text = self.body_text()?;
        for line in text.lines() {
            if line.is_empty() {
                // End of headers
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("subject") {
                    return Some(value.trim().to_owned());
                }
            }
        }
        None
    }

    /// Check if the body contains a specific text
    pub fn contains_text(&self, text: &str) -> bool {
        self.body_text().is_some_and(|body| body.contains(text))
    }
}
