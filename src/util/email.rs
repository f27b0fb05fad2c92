use crate::config::{EmailConfig, ConfigError};
use crate::model::quote::QuoteRequest;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use tracing::{error, info, instrument};

const COMPANY_NAME: &str = "Budeba General Enterprise";

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Email message builder
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
}

impl EmailMessage {
    pub fn new(to: String, subject: String) -> Self {
        Self {
            to,
            subject,
            text_body: None,
            html_body: None,
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }
}

/// Outbound notifications triggered by a new quote request.
#[async_trait]
pub trait QuoteNotifier: Send + Sync {
    /// Tells staff a quote request arrived.
    async fn notify_staff(&self, quote: &QuoteRequest) -> Result<(), EmailError>;
    /// Acknowledges the request to the customer at `to`.
    async fn confirm_customer(&self, to: &str, quote: &QuoteRequest) -> Result<(), EmailError>;
}

/// Notifier used when no email configuration could be loaded; every send fails.
pub struct DisabledNotifier {
    pub reason: String,
}

#[async_trait]
impl QuoteNotifier for DisabledNotifier {
    async fn notify_staff(&self, _quote: &QuoteRequest) -> Result<(), EmailError> {
        Err(EmailError::ConfigError(self.reason.clone()))
    }

    async fn confirm_customer(&self, _to: &str, _quote: &QuoteRequest) -> Result<(), EmailError> {
        Err(EmailError::ConfigError(self.reason.clone()))
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Staff notification for a freshly stored quote request.
pub fn staff_notification(to: &str, quote: &QuoteRequest) -> EmailMessage {
    let subject = format!("New Quote Request: {} ({})", quote.full_name, quote.service);
    let text = format!(
        r#"New Quote Request Received

Name: {name}
Phone: {phone}
Email: {email}
Company: {company}
Location: {location}
Service: {service}
Budget: {budget}
Preferred Delivery Date: {delivery}

Items Requested:
{items}

---
{company_name} Website"#,
        name = quote.full_name,
        phone = quote.phone,
        email = or_dash(&quote.email),
        company = or_dash(&quote.company),
        location = or_dash(&quote.location),
        service = quote.service,
        budget = or_dash(&quote.budget),
        delivery = or_dash(&quote.delivery_date),
        items = quote.items,
        company_name = COMPANY_NAME,
    );
    let rows = [
        ("Name", quote.full_name.as_str()),
        ("Phone", quote.phone.as_str()),
        ("Email", or_dash(&quote.email)),
        ("Company", or_dash(&quote.company)),
        ("Location", or_dash(&quote.location)),
        ("Service", quote.service.as_str()),
        ("Budget", or_dash(&quote.budget)),
        ("Preferred Delivery Date", or_dash(&quote.delivery_date)),
    ];
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<body style="font-family: Arial, sans-serif; color: #333;">
    <h2>New Quote Request Received</h2>
    <table>{rows}</table>
    <h3>Items Requested</h3>
    <pre style="white-space: pre-wrap;">{items}</pre>
    <p style="font-size: 12px; color: #6c757d;">{company_name} Website</p>
</body>
</html>"#,
        rows = html_rows(&rows),
        items = html_escape::encode_text(&quote.items),
        company_name = COMPANY_NAME,
    );
    EmailMessage::new(to.to_string(), subject)
        .with_text_body(text)
        .with_html_body(html)
}

/// Customer acknowledgement for a quote request.
pub fn customer_confirmation(to: &str, quote: &QuoteRequest) -> EmailMessage {
    let subject = format!("We received your quote request - {}", COMPANY_NAME);
    let text = format!(
        r#"Hello {name},

Thank you for contacting {company_name}.
We have received your quote request and our team will contact you shortly.

Summary:
- Phone: {phone}
- Service: {service}
- Budget: {budget}
- Preferred Delivery Date: {delivery}

Items Requested:
{items}

If you need to add more details, reply to this email with updates.

Kind regards,
{company_name}"#,
        name = quote.full_name,
        phone = quote.phone,
        service = quote.service,
        budget = or_dash(&quote.budget),
        delivery = or_dash(&quote.delivery_date),
        items = quote.items,
        company_name = COMPANY_NAME,
    );
    let rows = [
        ("Phone", quote.phone.as_str()),
        ("Service", quote.service.as_str()),
        ("Budget", or_dash(&quote.budget)),
        ("Preferred Delivery Date", or_dash(&quote.delivery_date)),
    ];
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<body style="font-family: Arial, sans-serif; color: #333;">
    <p>Hello {name},</p>
    <p>Thank you for contacting {company_name}. We have received your quote request and our team will contact you shortly.</p>
    <table>{rows}</table>
    <h3>Items Requested</h3>
    <pre style="white-space: pre-wrap;">{items}</pre>
    <p>If you need to add more details, reply to this email with updates.</p>
    <p>Kind regards,<br>{company_name}</p>
</body>
</html>"#,
        name = html_escape::encode_text(&quote.full_name),
        rows = html_rows(&rows),
        items = html_escape::encode_text(&quote.items),
        company_name = COMPANY_NAME,
    );
    EmailMessage::new(to.to_string(), subject)
        .with_text_body(text)
        .with_html_body(html)
}

fn html_rows(rows: &[(&str, &str)]) -> String {
    rows.iter()
        .map(|(label, value)| {
            format!(
                "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
                label,
                html_escape::encode_text(value)
            )
        })
        .collect()
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        if config.use_tls {
            let tls_parameters = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;

            if config.use_starttls {
                transport_builder = transport_builder.tls(Tls::Required(tls_parameters));
            } else {
                transport_builder = transport_builder.tls(Tls::Wrapper(tls_parameters));
            }
        } else {
            transport_builder = transport_builder.tls(Tls::None);
        }

        if !config.smtp_username.is_empty() && !config.smtp_password.is_empty() {
            let credentials = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            );
            transport_builder = transport_builder.credentials(credentials);
        }

        let transport = transport_builder.build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    /// Send an email message
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    pub async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!("Sending email to: {}", message.to);

        validate_email_address(&message.to)?;

        let email_message = self.build_message(message)?;

        self.transport
            .send(email_message)
            .await
            .map_err(|e| {
                error!("Failed to send email: {}", e);
                EmailError::SmtpError(format!("Failed to send email: {}", e))
            })?;

        info!("Email sent successfully");
        Ok(())
    }

    /// Build a lettre Message from EmailMessage
    fn build_message(&self, email_message: EmailMessage) -> Result<Message, EmailError> {
        let from_mailbox: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;

        let to_mailbox: Mailbox = email_message.to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        let message_builder = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(&email_message.subject);

        match (email_message.text_body, email_message.html_body) {
            (Some(text), Some(html)) => message_builder
                .multipart(
                    lettre::message::MultiPart::alternative()
                        .singlepart(
                            lettre::message::SinglePart::builder()
                                .header(ContentType::TEXT_PLAIN)
                                .body(text),
                        )
                        .singlepart(
                            lettre::message::SinglePart::builder()
                                .header(ContentType::TEXT_HTML)
                                .body(html),
                        ),
                )
                .map_err(|e| EmailError::MessageError(format!("Failed to build multipart message: {}", e))),
            (Some(text), None) => message_builder
                .body(text)
                .map_err(|e| EmailError::MessageError(format!("Failed to build text message: {}", e))),
            (None, Some(html)) => message_builder
                .singlepart(
                    lettre::message::SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html),
                )
                .map_err(|e| EmailError::MessageError(format!("Failed to build HTML message: {}", e))),
            (None, None) => Err(EmailError::MessageError("No message body provided".to_string())),
        }
    }
}

#[async_trait]
impl QuoteNotifier for SmtpEmailService {
    #[instrument(skip(self, quote), fields(quote_id = %quote.id))]
    async fn notify_staff(&self, quote: &QuoteRequest) -> Result<(), EmailError> {
        let message = staff_notification(&self.config.staff_email, quote);
        self.send_email(message).await
    }

    #[instrument(skip(self, quote), fields(quote_id = %quote.id, to = %to))]
    async fn confirm_customer(&self, to: &str, quote: &QuoteRequest) -> Result<(), EmailError> {
        let message = customer_confirmation(to, quote);
        self.send_email(message).await
    }
}

/// Basic shape check before handing an address to SMTP.
pub fn validate_email_address(email: &str) -> Result<(), EmailError> {
    if email.is_empty() {
        return Err(EmailError::AddressError("Email address cannot be empty".to_string()));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(EmailError::AddressError("Invalid email format".to_string()));
    }

    Ok(())
}
