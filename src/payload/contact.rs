//! Contact-style payloads: vCard, mailto, SMS, tel and geo URIs

use super::uri_component;
use serde::{Deserialize, Serialize};

/// vCard 3.0 contact card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcardRequest {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Organization
    pub organization: String,
    /// Job title
    pub title: String,
    /// Phone number
    pub phone: String,
    /// Email address
    pub email: String,
    /// Street address (single line)
    pub address: String,
    /// Website URL
    pub website: String,
}

impl VcardRequest {
    fn is_blank(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.organization,
            &self.title,
            &self.phone,
            &self.email,
            &self.address,
            &self.website,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}

/// Email draft opened through a `mailto:` link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailRequest {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub body: String,
}

/// Prefilled SMS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsRequest {
    /// Recipient phone number
    pub phone: String,
    /// Message text
    pub message: String,
}

/// Phone number to dial
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneRequest {
    /// Number, passed through as typed
    pub number: String,
}

/// Map coordinates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRequest {
    /// Latitude, passed through as typed
    pub latitude: String,
    /// Longitude, passed through as typed
    pub longitude: String,
}

pub(super) fn encode_vcard(request: &VcardRequest) -> Option<String> {
    if request.is_blank() {
        return None;
    }

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("N:{};{}", request.last_name, request.first_name),
    ];
    let optional = [
        ("ORG:", &request.organization),
        ("TITLE:", &request.title),
        ("TEL:", &request.phone),
        ("EMAIL:", &request.email),
        ("ADR:;;", &request.address),
        ("URL:", &request.website),
    ];
    lines.extend(
        optional
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(prefix, value)| format!("{prefix}{value}")),
    );
    lines.push("END:VCARD".to_string());

    Some(lines.join("\n"))
}

pub(super) fn encode_email(request: &EmailRequest) -> Option<String> {
    if request.to.is_empty() {
        return None;
    }

    Some(format!(
        "mailto:{}?subject={}&body={}",
        request.to,
        uri_component(&request.subject),
        uri_component(&request.body)
    ))
}

pub(super) fn encode_sms(request: &SmsRequest) -> Option<String> {
    if request.phone.is_empty() {
        return None;
    }

    Some(format!(
        "SMSTO:{}:{}",
        request.phone,
        uri_component(&request.message)
    ))
}

pub(super) fn encode_phone(request: &PhoneRequest) -> String {
    format!("tel:{}", request.number)
}

pub(super) fn encode_location(request: &LocationRequest) -> Option<String> {
    if request.latitude.is_empty() || request.longitude.is_empty() {
        return None;
    }

    Some(format!("geo:{},{}", request.latitude, request.longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_vcard_keeps_field_order() {
        let request = VcardRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            organization: "Analytical Engines".to_string(),
            title: "Programmer".to_string(),
            phone: "+441234567".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 St James's Square".to_string(),
            website: "https://example.com".to_string(),
        };
        assert_eq!(
            encode_vcard(&request).unwrap(),
            "BEGIN:VCARD\nVERSION:3.0\nN:Lovelace;Ada\nORG:Analytical Engines\n\
             TITLE:Programmer\nTEL:+441234567\nEMAIL:ada@example.com\n\
             ADR:;;12 St James's Square\nURL:https://example.com\nEND:VCARD"
        );
    }

    #[test]
    fn test_sparse_vcard_skips_empty_lines() {
        let request = VcardRequest {
            email: "someone@example.com".to_string(),
            ..VcardRequest::default()
        };
        assert_eq!(
            encode_vcard(&request).unwrap(),
            "BEGIN:VCARD\nVERSION:3.0\nN:;\nEMAIL:someone@example.com\nEND:VCARD"
        );
        assert_eq!(encode_vcard(&VcardRequest::default()), None);
    }

    #[test]
    fn test_email_keeps_uri_marks_unescaped() {
        let request = EmailRequest {
            to: "a@b.c".to_string(),
            subject: "Hi! (urgent)*".to_string(),
            body: "it's".to_string(),
        };
        assert_eq!(
            encode_email(&request).unwrap(),
            "mailto:a@b.c?subject=Hi!%20(urgent)*&body=it's"
        );
    }

    #[test]
    fn test_email_encodes_subject_and_body() {
        let request = EmailRequest {
            to: "team@example.com".to_string(),
            subject: "Hello there".to_string(),
            body: "Line one\nLine two".to_string(),
        };
        assert_eq!(
            encode_email(&request).unwrap(),
            "mailto:team@example.com?subject=Hello%20there&body=Line%20one%0ALine%20two"
        );

        let missing = EmailRequest {
            subject: "orphan".to_string(),
            ..EmailRequest::default()
        };
        assert_eq!(encode_email(&missing), None);
    }

    #[test]
    fn test_sms() {
        let request = SmsRequest {
            phone: "+8801712345678".to_string(),
            message: "Call me?".to_string(),
        };
        assert_eq!(
            encode_sms(&request).unwrap(),
            "SMSTO:+8801712345678:Call%20me%3F"
        );
        assert_eq!(encode_sms(&SmsRequest::default()), None);
    }

    #[test]
    fn test_phone_is_never_gated() {
        assert_eq!(encode_phone(&PhoneRequest::default()), "tel:");
        let request = PhoneRequest {
            number: "+15551234".to_string(),
        };
        assert_eq!(encode_phone(&request), "tel:+15551234");
    }

    #[test]
    fn test_location_needs_both_coordinates() {
        let request = LocationRequest {
            latitude: "23.8103".to_string(),
            longitude: "90.4125".to_string(),
        };
        assert_eq!(encode_location(&request).unwrap(), "geo:23.8103,90.4125");

        let half = LocationRequest {
            latitude: "23.8103".to_string(),
            ..LocationRequest::default()
        };
        assert_eq!(encode_location(&half), None);
    }

    #[test]
    fn test_location_passes_malformed_values() {
        let request = LocationRequest {
            latitude: "north".to_string(),
            longitude: "-999".to_string(),
        };
        assert_eq!(encode_location(&request).unwrap(), "geo:north,-999");
    }
}
