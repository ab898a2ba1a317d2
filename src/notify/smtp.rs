//! Email notification via SMTP
//!
//! [`SmtpNotifier`] wraps the `lettre` async SMTP transport. The message
//! itself is assembled by [`OrderEmail`], which renders an HTML body with
//! `tera` (autoescaped, so customer input cannot inject markup).

use crate::config::SmtpConfig;
use crate::core::{Notifier, Order};
use crate::notify::NotifyError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "order_notification.html";
const TEMPLATE: &str = include_str!("order_notification.html");

/// Builds the notification message for an order
pub struct OrderEmail {
    templates: Tera,
    sender_name: String,
    sender: String,
    recipient: String,
}

impl OrderEmail {
    pub fn new(
        sender_name: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let mut templates = Tera::default();
        templates.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;

        Ok(Self {
            templates,
            sender_name: sender_name.into(),
            sender: sender.into(),
            recipient: recipient.into(),
        })
    }

    pub fn subject(order: &Order) -> String {
        format!("🐟 New Fish Parque Order - {}", order.number)
    }

    /// Render the HTML body
    pub fn render_body(&self, order: &Order) -> Result<String, NotifyError> {
        let mut context = Context::new();
        context.insert("order_number", &order.number);
        context.insert("order_date", &order.date());
        context.insert("name", &order.details.name);
        context.insert("phone", &order.details.phone);
        context.insert("address", &order.details.address);
        context.insert("product", order.product().display_name());
        context.insert("quantity", &order.quantity_display());
        context.insert("notes", order.notes_display());

        Ok(self.templates.render(TEMPLATE_NAME, &context)?)
    }

    /// Assemble the complete message
    pub fn build(&self, order: &Order) -> Result<Message, NotifyError> {
        let from = Mailbox::new(Some(self.sender_name.clone()), self.sender.parse::<Address>()?);
        let to = Mailbox::new(None, self.recipient.parse::<Address>()?);

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(Self::subject(order))
            .header(ContentType::TEXT_HTML)
            .body(self.render_body(order)?)?;

        Ok(message)
    }
}

/// Sends order notifications through an SMTP relay (STARTTLS)
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    email: OrderEmail,
}

impl SmtpNotifier {
    /// Create the notifier; no connection is made until the first send
    pub fn new(config: SmtpConfig) -> Result<Self, NotifyError> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.connect_timeout()))
            .build();

        let email = OrderEmail::new(
            config.sender_name.clone(),
            config.username.clone(),
            config.recipient(),
        )?;

        Ok(Self { mailer, email })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, order: &Order) -> Result<(), NotifyError> {
        let message = self.email.build(order)?;
        self.mailer.send(message).await?;

        tracing::debug!(order_number = %order.number, "SMTP relay accepted notification");
        Ok(())
    }
}
