//! Order notification email.
//!
//! Uses SMTP via lettre for delivery with Askama HTML and text templates.
//! Sending is best effort: callers log failures and never surface them to
//! the customer.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use shilpini_core::{NewOrder, format_amount};

use crate::config::EmailConfig;

/// Shown for an order without notes.
const NO_NOTES: &str = "N/A";

/// One line of the notification.
#[derive(Debug, Clone)]
pub struct NotificationItem {
    pub name: String,
    /// Option summary such as `Color: Red, Size: M`; empty when none.
    pub options: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Everything the shop owner needs to fulfil an order.
#[derive(Debug, Clone)]
pub struct OrderNotification {
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub notes: String,
    pub items: Vec<NotificationItem>,
    pub subtotal: String,
    pub shipping_cost: String,
    pub total: String,
}

impl OrderNotification {
    /// Build the notification for a just-placed order.
    #[must_use]
    pub fn new(order_number: &str, order: &NewOrder) -> Self {
        let notes = order
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(NO_NOTES)
            .to_owned();

        Self {
            order_number: order_number.to_owned(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            address: order.address.clone(),
            notes,
            items: order
                .items
                .iter()
                .map(|item| NotificationItem {
                    name: item.product_name.clone(),
                    options: item.selected_options.summary(),
                    quantity: item.quantity,
                    line_total: format_amount(item.line_total()),
                })
                .collect(),
            subtotal: format_amount(order.subtotal),
            shipping_cost: format_amount(order.shipping_cost),
            total: format_amount(order.total),
        }
    }

    #[must_use]
    pub fn subject(&self) -> String {
        format!("New Order Received: {}", self.order_number)
    }
}

#[derive(Template)]
#[template(path = "email/order_notification.html")]
struct OrderNotificationHtml<'a> {
    order: &'a OrderNotification,
}

#[derive(Template)]
#[template(path = "email/order_notification.txt")]
struct OrderNotificationText<'a> {
    order: &'a OrderNotification,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Sends order notifications to the shop inbox.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    notification_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            notification_address: config.notification_address.clone(),
        })
    }

    /// Send the new-order notification.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to render or send.
    pub async fn send_order_notification(
        &self,
        order: &OrderNotification,
    ) -> Result<(), EmailError> {
        let html = OrderNotificationHtml { order }.render()?;
        let text = OrderNotificationText { order }.render()?;

        self.send_multipart_email(&self.notification_address, &order.subject(), &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shilpini_core::{NewOrderItem, ProductId, SelectedOptions};

    use super::*;

    fn order(notes: Option<&str>) -> NewOrder {
        NewOrder {
            customer_name: "Rahima Khatun".to_owned(),
            customer_phone: "01712345678".to_owned(),
            address: "House 12, Road 4, Sylhet".to_owned(),
            notes: notes.map(str::to_owned),
            subtotal: Decimal::from(1500),
            shipping_cost: Decimal::from(180),
            discount: Decimal::ZERO,
            total: Decimal::from(1680),
            items: vec![NewOrderItem {
                product_id: ProductId::new(1),
                product_name: "Jamdani Saree".to_owned(),
                product_image: None,
                price: Decimal::from(500),
                quantity: 3,
                selected_options: SelectedOptions::new().with("Size", "M"),
            }],
        }
    }

    #[test]
    fn test_blank_notes_show_placeholder() {
        assert_eq!(OrderNotification::new("SHILP1001", &order(None)).notes, "N/A");
        assert_eq!(OrderNotification::new("SHILP1001", &order(Some("  "))).notes, "N/A");
        assert_eq!(
            OrderNotification::new("SHILP1001", &order(Some("Call first"))).notes,
            "Call first"
        );
    }

    #[test]
    fn test_notification_amounts() {
        let n = OrderNotification::new("SHILP1001", &order(None));
        assert_eq!(n.subject(), "New Order Received: SHILP1001");
        assert_eq!(n.items[0].line_total, "1500.00");
        assert_eq!(n.items[0].options, "Size: M");
        assert_eq!(n.total, "1680.00");
    }

    #[test]
    fn test_templates_render() {
        let n = OrderNotification::new("SHILP1001", &order(Some("<b>fragile</b>")));

        let html = OrderNotificationHtml { order: &n }.render().unwrap();
        assert!(html.contains("SHILP1001"));
        assert!(html.contains("Jamdani Saree"));
        assert!(!html.contains("<b>fragile</b>"));

        let text = OrderNotificationText { order: &n }.render().unwrap();
        assert!(text.contains("Total: 1680.00"));
        assert!(text.contains("Size: M"));
    }
}
