use antimail::SmtpServer;
use lettre::message::{Mailbox, Message};
use lettre::{SmtpTransport, Transport};
use std::error::Error;
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[test]
fn basic_lettre_send() -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    let (tx, rx) = mpsc::channel();
    let server = SmtpServer::new("localhost");

    thread::spawn(move || {
        server
            .start_with_listener(listener, tx)
            .expect("server start failed")
    });

    let message = Message::builder()
        .from("花子 <hanako@example.com>".parse::<Mailbox>()?)
        .to("太郎 <tarou@example.com>".parse::<Mailbox>()?)
        .subject("Greetings")
        .body(".leading dot\r\nsecond line\r\n".to_owned())?;

    // without connection pooling every send ends with QUIT
    let mailer = SmtpTransport::builder_dangerous("127.0.0.1")
        .port(port)
        .build();

    mailer.send(&message)?;

    let envelope = rx.recv_timeout(Duration::from_secs(2))?;
    assert_eq!(envelope.sender, "hanako@example.com");
    assert_eq!(envelope.recipient, "tarou@example.com");
    assert_eq!(envelope.get_subject(), Some("Greetings".to_string()));
    assert!(envelope.contains_text("\r\n.leading dot\r\n"));

    Ok(())
}
