/// HTML letters sent to account holders.
///
/// Placeholders are written `{{key}}` and substituted by [`Template::render`].
/// Substituted values are HTML-escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Verify,
    Forgot,
    Reset,
}

impl Template {
    fn source(&self) -> &'static str {
        match self {
            Self::Verify => VERIFY,
            Self::Forgot => FORGOT,
            Self::Reset => RESET,
        }
    }
    /// Single pass over the template; substituted text is never rescanned.
    /// Unknown placeholders are left as written.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut html = String::with_capacity(self.source().len());
        let mut rest = self.source();
        while let Some(open) = rest.find("{{") {
            html.push_str(&rest[..open]);
            let tail = &rest[open + 2..];
            match tail.find("}}").map(|close| (&tail[..close], close)) {
                Some((key, close)) => {
                    match values.iter().find(|(k, _)| *k == key) {
                        Some((_, value)) => html.push_str(&escape(value)),
                        None => html.push_str(&rest[open..open + 2 + close + 2]),
                    }
                    rest = &tail[close + 2..];
                }
                None => {
                    html.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        html.push_str(rest);
        html
    }
}

fn escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            c => c.to_string(),
        })
        .collect()
}

const VERIFY: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif;">
    <p>Hi {{name}},</p>
    <p>Thanks for signing up. Confirm your email address to activate your account.</p>
    <p><a href="{{url}}">Verify my account</a></p>
    <p>If the button does not work, paste this link into your browser:<br>{{url}}</p>
  </body>
</html>
"#;

const FORGOT: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif;">
    <p>Hi {{name}},</p>
    <p>Someone asked to reset the password on your account. The link below is valid for 10 minutes.</p>
    <p><a href="{{url}}">Choose a new password</a></p>
    <p>If you did not ask for this, you can ignore this email.</p>
  </body>
</html>
"#;

const RESET: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif;">
    <p>Hi {{name}},</p>
    <p>Your password was just changed. If this was not you, reset it again right away.</p>
  </body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_every_placeholder() {
        let html = Template::Verify.render(&[("name", "ada"), ("url", "http://x/activate/t")]);
        assert!(html.contains("Hi ada,"));
        assert_eq!(html.matches("http://x/activate/t").count(), 2);
        assert!(!html.contains("{{"));
    }
    #[test]
    fn render_escapes_values() {
        let html = Template::Reset.render(&[("name", "<script>")]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
    #[test]
    fn placeholders_inside_values_stay_literal() {
        let html = Template::Verify.render(&[("name", "{{url}}"), ("url", "http://x/activate/t")]);
        assert!(html.contains("Hi {{url}},"));
        assert_eq!(html.matches("http://x/activate/t").count(), 2);
    }
}
