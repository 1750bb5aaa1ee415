//! Rendered email content for the two verification message types.

/// A fully rendered message: subject plus HTML and plaintext bodies.
pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl EmailContent {
    /// Message carrying a freshly issued verification code.
    pub fn otp_code(recipient_name: &str, code: &str) -> Self {
        Self {
            subject: "Your PaperStack verification code".to_string(),
            text: Self::otp_text(recipient_name, code),
            html: Self::otp_html(recipient_name, code),
        }
    }

    /// Confirmation sent after a verification completes.
    pub fn access_granted(recipient_name: &str) -> Self {
        Self {
            subject: "PaperStack contributor access granted".to_string(),
            text: Self::granted_text(recipient_name),
            html: Self::granted_html(recipient_name),
        }
    }

    fn otp_text(name: &str, code: &str) -> String {
        format!(
            r#"Hello {},

You asked to verify your campus email address to gain contributor
access on PaperStack.

Your verification code is: {}

Enter this code on the verification page within 10 minutes.

If you didn't request this code, please ignore this email.

--
PaperStack"#,
            name, code
        )
    }

    fn otp_html(name: &str, code: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background: #f5f5f5; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 40px 20px; }}
        .card {{ background: white; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        h1 {{ color: #1a1a1a; margin-top: 0; font-size: 24px; }}
        .code {{ font-size: 36px; font-weight: bold; letter-spacing: 8px; color: #2563eb; text-align: center; padding: 24px; background: #f0f7ff; border-radius: 8px; margin: 24px 0; font-family: 'SF Mono', Monaco, monospace; }}
        .expires {{ color: #666; font-size: 14px; text-align: center; }}
        .footer {{ margin-top: 32px; padding-top: 20px; border-top: 1px solid #eee; color: #888; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="card">
            <h1>Verify your campus email</h1>
            <p>Hello <strong>{}</strong>, your verification code is:</p>
            <div class="code">{}</div>
            <p class="expires">This code will expire in 10 minutes.</p>
            <div class="footer">
                <p>If you didn't request this code, please ignore this email.</p>
                <p>PaperStack</p>
            </div>
        </div>
    </div>
</body>
</html>"#,
            name, code
        )
    }

    fn granted_text(name: &str) -> String {
        format!(
            r#"Congratulations {},

Your campus email address has been verified. You now have contributor
access on PaperStack: you can upload question papers and study
material, and manage content you contributed.

--
PaperStack"#,
            name
        )
    }

    fn granted_html(name: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background: white; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="color: #1a1a1a; margin-top: 0; font-size: 24px;">Contributor access granted</h1>
        <p>Congratulations <strong>{}</strong>!</p>
        <p>Your campus email address has been verified. You can now upload
        question papers and study material, and manage content you
        contributed.</p>
        <div style="margin-top: 32px; padding-top: 20px; border-top: 1px solid #eee; color: #888; font-size: 12px;">
            <p>PaperStack</p>
        </div>
    </div>
</body>
</html>"#,
            name
        )
    }
}
