//! Email templates.
//!
//! Askama templates under `templates/`, checked at compile time. The HTML
//! body escapes its variables; the plain-text body does not.

use askama::Template;

/// Rendered email bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

#[derive(Template)]
#[template(path = "verification_email.html")]
struct VerificationHtml<'a> {
    username: &'a str,
    code: &'a str,
}

#[derive(Template)]
#[template(path = "verification_email.txt")]
struct VerificationText<'a> {
    username: &'a str,
    code: &'a str,
}

/// Render the verification email for `username` carrying `otp`.
pub fn verification_email(username: &str, otp: &str) -> askama::Result<RenderedEmail> {
    let html = VerificationHtml {
        username,
        code: otp,
    }
    .render()?;
    let text = VerificationText {
        username,
        code: otp,
    }
    .render()?;

    Ok(RenderedEmail { html, text })
}
