//! Sends the "new event found" notification email.

use lettre::AsyncTransport;

const SMTP_HOST: &str = "smtp.gmail.com";
const SMTP_PORT: u16 = 465;

const SUBJECT: &str = "New tour announced";

fn format_message(event: &crate::Event) -> String {
    format!("Hey, a new event was found: {event}")
}

pub(crate) async fn send_new_event(event: &crate::Event) -> anyhow::Result<()> {
    let config = crate::config::config();

    let message = lettre::Message::builder()
        .from(config.smtp_username.parse()?)
        .to(config.smtp_receiver.parse()?)
        .subject(SUBJECT)
        .header(lettre::message::header::ContentType::TEXT_PLAIN)
        .body(format_message(event))?;

    let credentials = lettre::transport::smtp::authentication::Credentials::new(
        config.smtp_username.clone(),
        config.smtp_password.clone(),
    );

    // Implicit TLS, not STARTTLS.
    let mailer = lettre::AsyncSmtpTransport::<lettre::Tokio1Executor>::relay(SMTP_HOST)?
        .port(SMTP_PORT)
        .credentials(credentials)
        .build();

    mailer.send(message).await?;
    tracing::info!(to = %config.smtp_receiver, event = %event, "Notification email sent");

    Ok(())
}
