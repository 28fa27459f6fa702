//! Outbound Mail Bodies
//!
//! Subjects and HTML bodies for the two mails the system sends.

/// Subject line for the verification code mail
pub const VERIFICATION_SUBJECT: &str = "OTP for verification";

/// Subject line for the password reset mail
pub const RESET_SUBJECT: &str = "Password Reset Link";

/// HTML body carrying the 6-digit verification code
pub fn verification_body(code: &str) -> String {
    format!(
        "<p>Your verification code is <strong>{code}</strong>.</p>\
         <p>It expires in 5 minutes. If you did not request it, ignore this email.</p>"
    )
}

/// HTML body carrying the password reset link
pub fn reset_body(link: &str) -> String {
    format!(
        "<p>Click the link below to reset your password:</p>\
         <p><a href=\"{link}\">{link}</a></p>\
         <p>The link expires in 15 minutes. If you did not request it, ignore this email.</p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_body_contains_code() {
        let body = verification_body("123456");
        assert!(body.contains("123456"));
    }

    #[test]
    fn test_reset_body_contains_link() {
        let link = "https://frontend/reset?token=abc";
        let body = reset_body(link);
        assert!(body.contains(link));
    }
}
