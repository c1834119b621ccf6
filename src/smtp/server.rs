//! SMTP server implementation

use crate::smtp::envelope::Envelope;
use crate::smtp::error::SmtpError;
use crate::smtp::session::SmtpSession;

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

/// Accepts connections and runs one session per connection on its own thread
///
/// Envelopes from sessions that end with QUIT are sent to a channel.
#[derive(Debug, Clone)]
pub struct SmtpServer {
    /// Server hostname, announced in the greeting
    hostname: String,
    /// Deadline for each read from a client
    read_timeout: Option<Duration>,
}

impl SmtpServer {
    /// Create a new SMTP server
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_owned(),
            read_timeout: None,
        }
    }

    /// Give up on a client once a single read blocks longer than `timeout`
    ///
    /// A zero timeout means no deadline.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout).filter(|t| !t.is_zero());
        self
    }

    /// Start the server on the specified address (blocking)
    /// Envelopes will be sent to the provided channel as sessions complete
    pub fn start(&self, addr: &str, sender: mpsc::Sender<Envelope>) -> Result<(), SmtpError> {
        let listener = TcpListener::bind(addr)?;
        self.start_with_listener(listener, sender)
    }

    /// Start the server with an existing listener (blocking)
    /// Envelopes will be sent to the provided channel as sessions complete
    pub fn start_with_listener(
        &self,
        listener: TcpListener,
        sender: mpsc::Sender<Envelope>,
    ) -> Result<(), SmtpError> {
        info!("SMTP server listening on {}", listener.local_addr()?);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.spawn_client(stream, sender.clone()),
                Err(e) => {
                    warn!("Error accepting connection: {e}");
                }
            }
        }

        Ok(())
    }

    fn spawn_client(&self, stream: TcpStream, sender: mpsc::Sender<Envelope>) {
        let peer = stream.peer_addr().ok();
        let server = self.clone();

        let spawned = thread::Builder::new()
            .name("smtp-session".to_owned())
            .spawn(move || server.handle_client(stream, peer, &sender));

        if let Err(e) = spawned {
            error!("Error spawning session thread: {e}");
        }
    }

    /// Run a session to completion, keeping its outcome inside this thread
    fn handle_client(
        &self,
        stream: TcpStream,
        peer: Option<SocketAddr>,
        sender: &mpsc::Sender<Envelope>,
    ) {
        info!(?peer, "+ connection");

        match self.run_session(stream) {
            Ok(Some(envelope)) => {
                info!(?peer, sender = %envelope.sender, recipient = %envelope.recipient, "session finished");
                // Errors when there are no listeners.
                // We ignore these errors for now.
                let _ = sender.send(envelope);
            }
            Ok(None) => {
                info!(?peer, "connection closed without QUIT");
            }
            Err(e) if e.is_io() => {
                warn!(?peer, "Error handling client: {e}");
            }
            Err(e) => {
                error!(?peer, "Error handling client: {e}");
            }
        }
    }

    fn run_session(&self, stream: TcpStream) -> Result<Option<Envelope>, SmtpError> {
        stream.set_read_timeout(self.read_timeout)?;
        let reader = stream.try_clone()?;
        SmtpSession::with_hostname(&self.hostname, reader, stream).run()
    }
}
