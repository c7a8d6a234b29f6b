//! Access code notifications.

use async_trait::async_trait;
use fileshare_shared::EmailService;

use super::error::NotifyError;
use super::service::Notifier;
use super::types::{FileRecord, Notification};

/// Subject line of access code emails.
pub const ACCESS_CODE_SUBJECT: &str = "Your File Access Code";

/// Build the message that delivers an access code to its recipient.
#[must_use]
pub fn access_code_notification(record: &FileRecord, ttl_days: i64) -> Notification {
    let message = format!(
        "Hello,\n\n\
         A file has been shared with you: {file_name}\n\n\
         Your access code is: {code}\n\n\
         The code is valid for {ttl_days} days, until {expires} (UTC).\n\n\
         Thank you!",
        file_name = record.file_name,
        code = record.access_code,
        expires = record.expiration_date.format("%Y-%m-%d %H:%M"),
    );

    Notification {
        recipient: record.recipient_email.clone(),
        subject: ACCESS_CODE_SUBJECT.to_string(),
        message,
    }
}

#[async_trait]
impl Notifier for EmailService {
    async fn publish(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.send_email(
            &notification.recipient,
            &notification.subject,
            &notification.message,
        )
        .await
        .map_err(NotifyError::from)
    }
}
