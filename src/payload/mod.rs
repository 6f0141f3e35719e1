//! Payload encoding
//!
//! A [`ContentRequest`] describes what the user filled in; [`PayloadEncoder`]
//! turns it into the exact text to embed in a QR code or barcode.
//!
//! Encoding never fails. When a request lacks its required fields the result
//! is an empty [`EncodedPayload`], which callers treat as "nothing to render
//! yet" rather than as an error.

mod app;
mod contact;
mod event;
mod merchant;
mod payment;
mod text;
mod wifi;

pub use app::{AppDownloadPolicy, AppDownloadRequest};
pub use contact::{EmailRequest, LocationRequest, PhoneRequest, SmsRequest, VcardRequest};
pub use event::{EventRequest, format_event_timestamp};
pub use merchant::{MerchantRequest, format_amount};
pub use payment::{BitcoinRequest, PaypalRequest};
pub use text::{BarcodeRequest, TextRequest};
pub use wifi::WifiRequest;

use crate::config::EncoderOptions;
use crate::emv::merchant::MerchantProvider;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content kinds the encoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    /// Plain text or URL
    TextUrl,
    /// WiFi network credentials
    Wifi,
    /// vCard 3.0 contact
    Vcard,
    /// mailto link
    Email,
    /// SMS message
    Sms,
    /// tel link
    Phone,
    /// geo URI
    Location,
    /// iCalendar VEVENT
    Event,
    /// PayPal payment link
    Paypal,
    /// Bitcoin URI
    Bitcoin,
    /// App store links
    AppDownload,
    /// bKash merchant QR
    Bkash,
    /// Nagad merchant QR
    Nagad,
    /// Raw barcode data
    Barcode,
}

impl ContentKind {
    /// Every kind, in wizard order
    pub const ALL: [ContentKind; 14] = [
        Self::TextUrl,
        Self::Wifi,
        Self::Vcard,
        Self::Email,
        Self::Sms,
        Self::Phone,
        Self::Location,
        Self::Event,
        Self::Paypal,
        Self::Bitcoin,
        Self::AppDownload,
        Self::Bkash,
        Self::Nagad,
        Self::Barcode,
    ];

    /// Kebab-case identifier, e.g. `text-url`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextUrl => "text-url",
            Self::Wifi => "wifi",
            Self::Vcard => "vcard",
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Phone => "phone",
            Self::Location => "location",
            Self::Event => "event",
            Self::Paypal => "paypal",
            Self::Bitcoin => "bitcoin",
            Self::AppDownload => "app-download",
            Self::Bkash => "bkash",
            Self::Nagad => "nagad",
            Self::Barcode => "barcode",
        }
    }

    /// Whether the payload is meant for a QR code (as opposed to a linear barcode)
    pub fn is_qr(self) -> bool {
        !matches!(self, Self::Barcode)
    }

    /// Default export file name, e.g. `qr-code-wifi.png`
    pub fn file_name(self, extension: &str) -> String {
        if self.is_qr() {
            format!("qr-code-{}.{extension}", self.as_str())
        } else {
            format!("{}.{extension}", self.as_str())
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Unknown content kind '{value}'"))
    }
}

/// Everything needed to build one payload, tagged by content kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentRequest {
    /// Plain text or URL
    TextUrl(TextRequest),
    /// WiFi network credentials
    Wifi(WifiRequest),
    /// vCard contact
    Vcard(VcardRequest),
    /// mailto link
    Email(EmailRequest),
    /// SMS message
    Sms(SmsRequest),
    /// tel link
    Phone(PhoneRequest),
    /// geo URI
    Location(LocationRequest),
    /// Calendar event
    Event(EventRequest),
    /// PayPal payment link
    Paypal(PaypalRequest),
    /// Bitcoin URI
    Bitcoin(BitcoinRequest),
    /// App store links
    AppDownload(AppDownloadRequest),
    /// bKash merchant QR
    Bkash(MerchantRequest),
    /// Nagad merchant QR
    Nagad(MerchantRequest),
    /// Raw barcode data
    Barcode(BarcodeRequest),
}

impl ContentRequest {
    /// The kind of content this request describes
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::TextUrl(_) => ContentKind::TextUrl,
            Self::Wifi(_) => ContentKind::Wifi,
            Self::Vcard(_) => ContentKind::Vcard,
            Self::Email(_) => ContentKind::Email,
            Self::Sms(_) => ContentKind::Sms,
            Self::Phone(_) => ContentKind::Phone,
            Self::Location(_) => ContentKind::Location,
            Self::Event(_) => ContentKind::Event,
            Self::Paypal(_) => ContentKind::Paypal,
            Self::Bitcoin(_) => ContentKind::Bitcoin,
            Self::AppDownload(_) => ContentKind::AppDownload,
            Self::Bkash(_) => ContentKind::Bkash,
            Self::Nagad(_) => ContentKind::Nagad,
            Self::Barcode(_) => ContentKind::Barcode,
        }
    }

    /// An empty request of the given kind (every field blank)
    pub fn empty(kind: ContentKind) -> Self {
        match kind {
            ContentKind::TextUrl => Self::TextUrl(TextRequest::default()),
            ContentKind::Wifi => Self::Wifi(WifiRequest::default()),
            ContentKind::Vcard => Self::Vcard(VcardRequest::default()),
            ContentKind::Email => Self::Email(EmailRequest::default()),
            ContentKind::Sms => Self::Sms(SmsRequest::default()),
            ContentKind::Phone => Self::Phone(PhoneRequest::default()),
            ContentKind::Location => Self::Location(LocationRequest::default()),
            ContentKind::Event => Self::Event(EventRequest::default()),
            ContentKind::Paypal => Self::Paypal(PaypalRequest::default()),
            ContentKind::Bitcoin => Self::Bitcoin(BitcoinRequest::default()),
            ContentKind::AppDownload => Self::AppDownload(AppDownloadRequest::default()),
            ContentKind::Bkash => Self::Bkash(MerchantRequest::default()),
            ContentKind::Nagad => Self::Nagad(MerchantRequest::default()),
            ContentKind::Barcode => Self::Barcode(BarcodeRequest::default()),
        }
    }
}

/// The exact text to embed; empty means "insufficient input, do not render"
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    /// The empty payload
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// True when the request lacked its required fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Payload text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Payload bytes as they go into the code
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Byte length of the payload
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Consume into the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for EncodedPayload {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Dispatches content requests to their sub-encoders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayloadEncoder {
    app_download: AppDownloadPolicy,
}

impl PayloadEncoder {
    /// Create an encoder with default policies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder from the `[encoder]` configuration section
    pub fn from_options(options: &EncoderOptions) -> Self {
        Self {
            app_download: options.app_download,
        }
    }

    /// Override how app-download requests with both store links are encoded
    pub fn with_app_download_policy(mut self, policy: AppDownloadPolicy) -> Self {
        self.app_download = policy;
        self
    }

    /// Build the payload for `request`.
    pub fn encode(&self, request: &ContentRequest) -> EncodedPayload {
        let encoded = match request {
            ContentRequest::TextUrl(req) => text::encode_text(req),
            ContentRequest::Wifi(req) => wifi::encode(req),
            ContentRequest::Vcard(req) => contact::encode_vcard(req),
            ContentRequest::Email(req) => contact::encode_email(req),
            ContentRequest::Sms(req) => contact::encode_sms(req),
            ContentRequest::Phone(req) => Some(contact::encode_phone(req)),
            ContentRequest::Location(req) => contact::encode_location(req),
            ContentRequest::Event(req) => event::encode(req),
            ContentRequest::Paypal(req) => payment::encode_paypal(req),
            ContentRequest::Bitcoin(req) => payment::encode_bitcoin(req),
            ContentRequest::AppDownload(req) => app::encode(req, self.app_download),
            ContentRequest::Bkash(req) => merchant::encode(MerchantProvider::Bkash, req),
            ContentRequest::Nagad(req) => merchant::encode(MerchantProvider::Nagad, req),
            ContentRequest::Barcode(req) => text::encode_barcode(req),
        };

        match encoded {
            Some(text) => EncodedPayload(text),
            None => {
                tracing::debug!(kind = %request.kind(), "Required fields missing; payload left empty");
                EncodedPayload::empty()
            }
        }
    }
}

/// Encode `request` with the default policies.
pub fn encode(request: &ContentRequest) -> EncodedPayload {
    PayloadEncoder::default().encode(request)
}

/// Characters escaped in a URI component: everything except ASCII
/// alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a form value for use inside a URI component.
pub(crate) fn uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.as_str().parse::<ContentKind>(), Ok(kind));
            assert_eq!(ContentRequest::empty(kind).kind(), kind);
        }
        assert_eq!(
            "APP_DOWNLOAD".parse::<ContentKind>(),
            Ok(ContentKind::AppDownload)
        );
        assert!("fax".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ContentKind::Wifi.file_name("png"), "qr-code-wifi.png");
        assert_eq!(ContentKind::Barcode.file_name("svg"), "barcode.svg");
    }

    #[test]
    fn test_empty_requests_gate_to_empty_payload() {
        for kind in ContentKind::ALL {
            let payload = encode(&ContentRequest::empty(kind));
            match kind {
                ContentKind::Phone => assert_eq!(payload.as_str(), "tel:"),
                _ => assert!(payload.is_empty(), "{kind} should gate to empty"),
            }
        }
    }

    #[test]
    fn test_request_deserializes_from_tagged_json() {
        let request: ContentRequest = serde_json::from_str(
            r#"{"type": "wifi", "ssid": "HomeNet", "password": "secret1"}"#,
        )
        .unwrap();
        assert_eq!(
            encode(&request).as_str(),
            "WIFI:S:HomeNet;T:WPA;P:secret1;H:false;"
        );

        let request: ContentRequest =
            serde_json::from_str(r#"{"type": "app-download", "ios_url": "https://apps.apple.com/x"}"#)
                .unwrap();
        assert_eq!(request.kind(), ContentKind::AppDownload);
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let request = ContentRequest::Bkash(MerchantRequest {
            number: "01712345678".to_string(),
            amount: Some(250.5),
            reference: "INV42".to_string(),
        });
        let encoder = PayloadEncoder::new();
        assert_eq!(encoder.encode(&request), encoder.encode(&request));
    }

    #[test]
    fn test_uri_component() {
        assert_eq!(uri_component("Hello World & more"), "Hello%20World%20%26%20more");
        assert_eq!(uri_component(""), "");
        assert_eq!(uri_component("Hi! (x)*"), "Hi!%20(x)*");
        assert_eq!(uri_component("it's ~a-b_c.d"), "it's%20~a-b_c.d");
        assert_eq!(uri_component("a+b=c/d?#"), "a%2Bb%3Dc%2Fd%3F%23");
        assert_eq!(uri_component("৳ café"), "%E0%A7%B3%20caf%C3%A9");
    }
}
