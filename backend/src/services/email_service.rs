//! Outbound mail: product-change notifications and password-reset links.
//!
//! Mail is a side effect of the primary request; callers log failures and
//! never let them affect the HTTP response.

use crate::config::EmailConfig;
use crate::errors::{ServiceError, ServiceResult};
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::str::FromStr;

pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new EmailService instance
    pub fn new(config: EmailConfig) -> ServiceResult<Self> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| ServiceError::internal(format!("Invalid SMTP host: {e}")))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { mailer, config })
    }

    /// Notifies the store team that a product was changed through the portal.
    pub async fn send_product_update_notification(
        &self,
        actor_name: &str,
        product_name: &str,
        permalink: &str,
        user_note: &str,
    ) -> ServiceResult<()> {
        let html = build_product_update_html(actor_name, product_name, permalink, user_note);
        let text = build_product_update_text(actor_name, product_name, permalink, user_note);

        self.send_email(
            &self.config.notify_address.clone(),
            "CleanAir Portal Notification",
            &html,
            &text,
        )
        .await
    }

    /// Sends a password-reset link to a portal user.
    pub async fn send_password_reset_email(
        &self,
        recipient_email: &str,
        user_id: &str,
    ) -> ServiceResult<()> {
        let reset_url = format!("{}/pw-reset/{}", self.config.portal_base_url, user_id);
        let html = build_password_reset_html(recipient_email, &reset_url);
        let text = build_password_reset_text(recipient_email, &reset_url);

        self.send_email(recipient_email, "Reset your password", &html, &text)
            .await
    }

    /// Sends a generic email
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> ServiceResult<()> {
        let from_mailbox = Mailbox::from_str(&self.config.from_address)
            .map_err(|e| ServiceError::internal(format!("Invalid from email: {e}")))?;

        let to_mailbox = Mailbox::from_str(to_email)
            .map_err(|e| ServiceError::internal(format!("Invalid recipient email: {e}")))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                lettre::message::MultiPart::alternative()
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_content.to_string()),
                    )
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_content.to_string()),
                    ),
            )
            .map_err(|e| ServiceError::internal(format!("Failed to build email: {e}")))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to send email: {e}")))?;

        Ok(())
    }
}

fn build_product_update_html(
    actor_name: &str,
    product_name: &str,
    permalink: &str,
    user_note: &str,
) -> String {
    format!(
        "<h3>Product Updated</h3>\
         <div>\
         <p><strong>User: </strong>{actor_name}</p>\
         <p><strong>Product: </strong><a href='{permalink}'>{product_name}</a></p>\
         <p><strong>Note: </strong>{user_note}</p>\
         </div>"
    )
}

fn build_product_update_text(
    actor_name: &str,
    product_name: &str,
    permalink: &str,
    user_note: &str,
) -> String {
    format!(
        "Product Updated\n\nUser: {actor_name}\nProduct: {product_name} ({permalink})\nNote: {user_note}\n"
    )
}

fn build_password_reset_html(email: &str, reset_url: &str) -> String {
    format!(
        "<p>You've requested to reset your CleanAir Portal password for {email}. \
         If you didn't request this you can safely ignore this email.</p>\
         <a href=\"{reset_url}\">Reset password</a>"
    )
}

fn build_password_reset_text(email: &str, reset_url: &str) -> String {
    format!(
        "You've requested to reset your CleanAir Portal password for {email}. \
         If you didn't request this you can safely ignore this email.\n\n{reset_url}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_mail_carries_link_and_recipient() {
        let html = build_password_reset_html(
            "jo@cleanair.com",
            "https://storeportal.cleanair.com/pw-reset/u-1",
        );
        assert!(html.contains("jo@cleanair.com"));
        assert!(html.contains("https://storeportal.cleanair.com/pw-reset/u-1"));
    }

    #[test]
    fn update_mail_summarizes_actor_product_and_note() {
        let html = build_product_update_html(
            "Jo Admin",
            "HEPA Filter",
            "https://store.cleanair.com/product/hepa",
            "price fixed",
        );
        assert!(html.contains("Jo Admin"));
        assert!(html.contains("HEPA Filter"));
        assert!(html.contains("price fixed"));
    }
}
