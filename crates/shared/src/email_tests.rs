use super::*;

fn test_config() -> EmailConfig {
    EmailConfig {
        smtp_host: "localhost".to_string(),
        smtp_port: 1025,
        smtp_username: "user".to_string(),
        smtp_password: "password".to_string(),
        from_email: "files@example.com".to_string(),
        from_name: "Fileshare".to_string(),
    }
}

#[test]
fn test_new_email_service() {
    let config = EmailConfig::default();
    let service = EmailService::new(config.clone());
    assert_eq!(service.config.smtp_host, config.smtp_host);
    assert_eq!(service.config.from_email, config.from_email);
}

#[tokio::test]
async fn test_create_transport() {
    let service = EmailService::new(test_config());
    assert!(service.create_transport().is_ok());
}

#[test]
fn test_build_message_valid() {
    let service = EmailService::new(test_config());
    let message = service
        .build_message("recipient@example.com", "Subject", "Body")
        .expect("message should build");

    let raw = String::from_utf8(message.formatted()).expect("utf8 message");
    assert!(raw.contains("To: recipient@example.com"));
    assert!(raw.contains("Subject: Subject"));
}

#[test]
fn test_build_message_invalid_recipient() {
    let service = EmailService::new(test_config());
    let err = service
        .build_message("not-an-address", "Subject", "Body")
        .unwrap_err();
    assert!(matches!(err, EmailError::InvalidAddress(_)));
}

#[test]
fn test_email_error_display() {
    assert_eq!(
        format!("{}", EmailError::BuildError("msg".into())),
        "Failed to build email: msg"
    );
    assert_eq!(
        format!("{}", EmailError::SendError("msg".into())),
        "Failed to send email: msg"
    );
    assert_eq!(
        format!("{}", EmailError::InvalidAddress("msg".into())),
        "Invalid email address: msg"
    );
}
