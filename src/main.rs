use antimail::SmtpServer;
use std::env;
use std::process;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let addr = args.get(1).map_or("0.0.0.0:2222", String::as_str);
    let hostname = args.get(2).map_or("localhost", String::as_str);

    let mut server = SmtpServer::new(hostname);
    if let Some(secs) = args.get(3) {
        match secs.parse::<u64>() {
            Ok(secs) => server = server.with_read_timeout(Duration::from_secs(secs)),
            Err(e) => {
                error!("Invalid read timeout {secs:?}: {e}");
                process::exit(2);
            }
        }
    }

    info!(addr, hostname, "Starting antimail SMTP server");

    let (tx, rx) = mpsc::channel::<antimail::Envelope>();

    thread::spawn(move || {
        let mut count = 0;
        while let Ok(envelope) = rx.recv() {
            count += 1;
            let subject = envelope.get_subject().unwrap_or_default();
            info!(
                count,
                sender = %envelope.sender,
                recipient = %envelope.recipient,
                size = envelope.data_size(),
                subject = %subject,
                "Received message"
            );
        }
    });

    if let Err(e) = server.start(addr, tx) {
        error!("Failed to start server: {e}");
        process::exit(1);
    }
}
