//! Minimal HTML pages of the web boundary

/// `escape` makes the given text safe to embed inside an HTML element
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

pub fn invitation_page(header: &str, url: &str) -> String {
    format!(
        r#"<html>
  <h1>{}</h1>
  <p>Copy-paste the invitation to the wallet application:</p>
  <textarea onclick="this.focus();this.select()" readonly="readonly" rows="10" cols="60">{}</textarea>
</html>"#,
        escape(header),
        escape(url)
    )
}

pub fn offer_sent_page() -> String {
    String::from(
        r#"<html>
  <h1>Offer sent!</h1>
  <p>Please open your wallet application and accept the credential.</p>
  <p>You can close this window.</p>
</html>"#,
    )
}

pub fn error_page() -> String {
    String::from("<html><h1>Error</h1></html>")
}
