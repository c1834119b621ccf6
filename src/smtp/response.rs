//! SMTP reply formatting

/// Represents an SMTP reply that can be sent to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpResponse {
    /// The three-digit reply code (e.g. 250, 354)
    pub code: u16,
    /// The human-readable message
    pub message: String,
}

impl SmtpResponse {
    /// Create a new SMTP reply
    pub fn new(code: u16, message: &str) -> Self {
        Self {
            code,
            message: message.to_owned(),
        }
    }

    /// Create a greeting reply (220)
    pub fn greeting(hostname: &str) -> Self {
        Self::new(220, &format!("{hostname} ESMTPD ready."))
    }

    /// Create an EHLO/HELO reply (250)
    pub fn hello() -> Self {
        Self::new(250, "Hola Mundo")
    }

    /// Create the reply to an accepted MAIL or RCPT (250)
    pub fn go_ahead() -> Self {
        Self::new(250, "Go ahead")
    }

    /// Create a DATA intermediate reply (354)
    pub fn data_start() -> Self {
        Self::new(354, "Go ahead. End your data with <CR><LF>.<CR><LF>")
    }

    /// Create the reply sent once the message body has been stored (250)
    pub fn data_accepted() -> Self {
        Self::new(250, "Thank you.")
    }

    /// Create a QUIT reply (221)
    pub fn quit() -> Self {
        Self::new(221, "OK, bye")
    }

    /// Format the reply for sending over the wire
    pub fn format(&self) -> String {
        format!("{} {}\r\n", self.code, self.message)
    }

    /// Check if this is a success reply (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Check if this is an intermediate reply (3xx)
    pub fn is_intermediate(&self) -> bool {
        (300..400).contains(&self.code)
    }
}
