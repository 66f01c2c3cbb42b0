use validator::validate_email;

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<EmailAddress, EmailError> {
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(EmailError::InvalidAddress(format!(
                "{} is not a valid email",
                s
            )))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("Invalid email subject {0}")]
    InvalidSubject(String),
    #[error("Invalid email Html content: {0}")]
    InvalidHtmlContent(String),
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// A single outgoing email: recipient, sender, subject and an HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    to: EmailAddress,
    from: EmailAddress,
    subject: EmailSubject,
    html: EmailHtmlContent,
}

impl EmailMessage {
    pub fn new(
        to: EmailAddress,
        from: EmailAddress,
        subject: EmailSubject,
        html: EmailHtmlContent,
    ) -> Self {
        Self {
            to,
            from,
            subject,
            html,
        }
    }

    pub fn to(&self) -> &EmailAddress {
        &self.to
    }

    pub fn from(&self) -> &EmailAddress {
        &self.from
    }

    pub fn subject_as_ref(&self) -> &EmailSubject {
        &self.subject
    }

    pub fn html_as_ref(&self) -> &EmailHtmlContent {
        &self.html
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EmailSubject(String);

impl TryFrom<&str> for EmailSubject {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if !value.trim().is_empty() {
            Ok(Self(value.to_string()))
        } else {
            Err(EmailError::InvalidSubject(
                "EmailSubject cannot be empty.".into(),
            ))
        }
    }
}

impl AsRef<str> for EmailSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EmailHtmlContent(String);

impl TryFrom<String> for EmailHtmlContent {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !value.trim().is_empty() {
            Ok(Self(value))
        } else {
            Err(EmailError::InvalidHtmlContent(
                "EmailHtmlContent cannot be empty.".into(),
            ))
        }
    }
}

impl AsRef<str> for EmailHtmlContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
