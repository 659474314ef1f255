//! RFC 2822 message composition

use std::fmt;

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::mail::{ResolvedSender, SendRequest};

lazy_static! {
    static ref NEEDS_ENCODED_WORD: Regex = Regex::new(r#"[^\x20-\x7E]|[",]"#).unwrap();
}

const CRLF: &str = "\r\n";

/// Formats a header value, wrapping it in an RFC 2047 encoded word when it contains
/// anything other than printable ASCII, or a `"` or `,`.
pub fn format_header_value(raw: &str) -> String {
    if NEEDS_ENCODED_WORD.is_match(raw) {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(raw.as_bytes()))
    } else {
        raw.to_string()
    }
}

/// A composed message, ready to be encoded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedMessage {
    headers: Vec<(String, String)>,
    body_html: String,
}

impl ComposedMessage {
    /// The headers, in the order they are written
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The value of the first header called `name`
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The HTML body
    pub fn body_html(&self) -> &str {
        &self.body_html
    }

    /// The full message as CRLF-terminated header lines, a blank line, then the body
    pub fn to_rfc2822(&self) -> String {
        let mut lines: Vec<String> = self
            .headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();

        lines.push(String::new());
        lines.push(self.body_html.clone());

        lines.join(CRLF)
    }

    /// Encodes the message for the upstream raw-message field
    pub fn encode_payload(&self) -> EncodedPayload {
        EncodedPayload(URL_SAFE_NO_PAD.encode(self.to_rfc2822().as_bytes()))
    }
}

/// A message encoded as unpadded URL-safe base64
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    /// The encoded message
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds the message for `request`, sent from `sender`.
pub fn compose_message(sender: &ResolvedSender, request: &SendRequest) -> ComposedMessage {
    let from = match sender.display_name() {
        Some(name) => format!("{} <{}>", format_header_value(name), sender.email_address()),
        None => sender.email_address().to_string(),
    };

    let headers = vec![
        ("MIME-Version", "1.0".to_string()),
        ("Content-Type", "text/html; charset=UTF-8".to_string()),
        ("From", from.clone()),
        ("Reply-To", from),
        ("To", request.recipient.clone()),
        ("Subject", format_header_value(&request.subject)),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect();

    ComposedMessage {
        headers,
        body_html: request.body_text.replace('\n', "<br>"),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::mail::AccessToken;

    use super::*;

    fn request(subject: &str, body: &str) -> SendRequest {
        SendRequest {
            recipient: "a@b.com".to_string(),
            subject: subject.to_string(),
            body_text: body.to_string(),
            access_token: AccessToken::new("tok"),
            display_name_override: None,
        }
    }

    fn decode_encoded_word(value: &str) -> TestResult<String> {
        let inner = value
            .strip_prefix("=?UTF-8?B?")
            .and_then(|rest| rest.strip_suffix("?="))
            .ok_or("not an encoded word")?;

        Ok(String::from_utf8(STANDARD.decode(inner)?)?)
    }

    #[test]
    fn test_format_header_value_passes_plain_ascii_through() {
        assert_eq!(format_header_value("Jane Doe"), "Jane Doe");
        assert_eq!(
            format_header_value("Re: [ticket #42] it's done!"),
            "Re: [ticket #42] it's done!"
        );
    }

    #[test]
    fn test_format_header_value_encodes_non_ascii() -> TestResult {
        let encoded = format_header_value("José");

        assert!(encoded.starts_with("=?UTF-8?B?"));
        assert!(encoded.ends_with("?="));
        assert_eq!(decode_encoded_word(&encoded)?, "José");

        Ok(())
    }

    #[test]
    fn test_format_header_value_encodes_quotes_and_commas() -> TestResult {
        let quoted = format_header_value("Jane \"JD\" Doe");
        let comma = format_header_value("Doe, Jane");

        assert_eq!(decode_encoded_word(&quoted)?, "Jane \"JD\" Doe");
        assert_eq!(decode_encoded_word(&comma)?, "Doe, Jane");

        Ok(())
    }

    #[test]
    fn test_format_header_value_encodes_control_characters() {
        assert!(format_header_value("tab\there").starts_with("=?UTF-8?B?"));
    }

    #[test]
    fn test_compose_message_header_order() {
        let sender = ResolvedSender::new("me@x.com", Some("Jane Doe".to_string()));
        let message = compose_message(&sender, &request("Hi", "hello"));

        let names: Vec<&str> = message
            .headers()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();

        assert_eq!(
            names,
            vec!["MIME-Version", "Content-Type", "From", "Reply-To", "To", "Subject"]
        );
        assert_eq!(message.header("From"), Some("Jane Doe <me@x.com>"));
        assert_eq!(message.header("Reply-To"), Some("Jane Doe <me@x.com>"));
        assert_eq!(message.header("To"), Some("a@b.com"));
        assert_eq!(message.header("Subject"), Some("Hi"));
    }

    #[test]
    fn test_compose_message_has_single_blank_line_before_body() {
        let sender = ResolvedSender::new("me@x.com", None);
        let raw = compose_message(&sender, &request("Hi", "line1\nline2")).to_rfc2822();

        assert_eq!(raw.matches("\r\n\r\n").count(), 1);

        let (head, body) = raw.split_once("\r\n\r\n").unwrap();

        assert_eq!(head.lines().count(), 6);
        assert_eq!(body, "line1<br>line2");
    }

    #[test]
    fn test_compose_message_bare_address_without_display_name() {
        let sender = ResolvedSender::new("me@x.com", None);
        let message = compose_message(&sender, &request("Hi", "hello"));

        assert_eq!(message.header("From"), Some("me@x.com"));
        assert_eq!(message.header("Reply-To"), Some("me@x.com"));
    }

    #[test]
    fn test_compose_message_encodes_display_name_but_not_address() -> TestResult {
        let sender = ResolvedSender::new("me@x.com", Some("José".to_string()));
        let message = compose_message(&sender, &request("Hi", "hello"));

        let from = message.header("From").ok_or("missing From")?;
        let (name, address) = from.split_once(' ').ok_or("missing address")?;

        assert_eq!(decode_encoded_word(name)?, "José");
        assert_eq!(address, "<me@x.com>");

        Ok(())
    }

    #[test]
    fn test_compose_message_encodes_non_ascii_subject() -> TestResult {
        let sender = ResolvedSender::new("me@x.com", None);
        let message = compose_message(&sender, &request("Café ☕", "hello"));

        let subject = message.header("Subject").ok_or("missing Subject")?;

        assert_eq!(decode_encoded_word(subject)?, "Café ☕");

        Ok(())
    }

    #[test]
    fn test_compose_message_does_not_escape_html() {
        let sender = ResolvedSender::new("me@x.com", None);
        let message = compose_message(&sender, &request("Hi", "<b>bold</b> & more\n"));

        assert_eq!(message.body_html(), "<b>bold</b> & more<br>");
    }

    #[test]
    fn test_encode_payload_is_url_safe_and_unpadded() -> TestResult {
        let sender = ResolvedSender::new("me@x.com", Some("Jane Doe".to_string()));
        let message = compose_message(&sender, &request("Hi??>", "~~~ line1\nline2"));

        let payload = message.encode_payload();

        assert!(!payload.as_str().contains(['+', '/', '=']));

        let decoded = URL_SAFE_NO_PAD.decode(payload.as_str())?;

        assert_eq!(decoded, message.to_rfc2822().into_bytes());

        Ok(())
    }
}
