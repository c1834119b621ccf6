//! SMTP session engine and connection acceptor

pub mod commands;
pub mod data;
pub mod envelope;
pub mod error;
pub mod response;
pub mod server;
pub mod session;

pub use commands::{Command, Verb};
pub use envelope::Envelope;
pub use error::{SmtpError, SmtpLimits};
pub use response::SmtpResponse;
pub use server::SmtpServer;
pub use session::{SmtpSession, SmtpState};
