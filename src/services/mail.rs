use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::Config;
use crate::models::event::Event;
use crate::utils::error::AppError;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid mail sender address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("SMTP transport setup failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Async SMTP mailer built once at startup from configuration.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Result<Self, MailerError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from: config.mail_from.parse()?,
        })
    }

    /// Sends the payment-confirmation email for one event. One attempt, no
    /// retry; a relay failure surfaces as an external-service error.
    pub async fn send_payment_confirmation(
        &self,
        recipient: &str,
        event: &Event,
    ) -> Result<(), AppError> {
        let to: Mailbox = recipient.parse().map_err(|_| {
            AppError::ValidationError("email is not a valid address".to_string())
        })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(format!("Payment confirmed: {}", event.title))
            .header(ContentType::TEXT_PLAIN)
            .body(confirmation_body(event))
            .map_err(|e| {
                AppError::InternalServerError(format!("Failed to build confirmation email: {e}"))
            })?;

        self.transport.send(email).await.map_err(|e| {
            tracing::error!(error = %e, event_id = %event.id, "SMTP send failed");
            AppError::ExternalServiceError("Failed to send confirmation email".to_string())
        })?;

        tracing::info!(event_id = %event.id, "Payment confirmation email sent");
        Ok(())
    }
}

fn confirmation_body(event: &Event) -> String {
    format!(
        "Your payment for \"{}\" is confirmed.\n\nWhen: {}\nWhere: {}\nPrice: {}\n\nShow the QR ticket from the app at the entrance.",
        event.title,
        event.date.to_rfc3339(),
        event.location,
        event.price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn sample_event() -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Rust Meetup".to_string(),
            description: None,
            date: Utc::now(),
            location: "Warehouse 12".to_string(),
            image_url: None,
            price: Decimal::new(2500, 2),
            rsvp_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn confirmation_body_mentions_the_event() {
        let body = confirmation_body(&sample_event());
        assert!(body.contains("Rust Meetup"));
        assert!(body.contains("Warehouse 12"));
        assert!(body.contains("25.00"));
    }

    #[test]
    fn confirmation_message_builds() {
        let event = sample_event();
        let message = Message::builder()
            .from("Tessera <tickets@example.com>".parse().unwrap())
            .to("ada@example.com".parse().unwrap())
            .subject(format!("Payment confirmed: {}", event.title))
            .header(ContentType::TEXT_PLAIN)
            .body(confirmation_body(&event));

        assert!(message.is_ok());
    }
}
