//! Helpers for rendering encode and inspection results for terminals and tools

use crate::emv::{MerchantPayload, crc::format_crc};
use crate::payload::{ContentKind, EncodedPayload};
use crate::qr::ScannedCode;
use hex::encode as hex_encode;
use serde_json::{Map, Value, json};

/// Combined structured and human-readable representation of a result
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render an encoded payload into both JSON and human-readable forms.
pub fn render_encoded(kind: ContentKind, payload: &EncodedPayload) -> Rendered {
    let mut root = Map::new();
    root.insert("kind".to_string(), Value::String(kind.to_string()));
    root.insert(
        "payload".to_string(),
        Value::String(payload.as_str().to_string()),
    );
    root.insert("byte_length".to_string(), Value::from(payload.len()));
    root.insert("empty".to_string(), Value::Bool(payload.is_empty()));

    let mut human = Vec::new();
    if payload.is_empty() {
        human.push(format!(
            "No {kind} payload yet: fill in the required fields to generate a code"
        ));
    } else {
        human.push(payload.as_str().to_string());
    }

    if matches!(kind, ContentKind::Bkash | ContentKind::Nagad) && !payload.is_empty() {
        let (value, lines) = merchant_section(payload.as_str());
        root.insert("merchant".to_string(), value);
        human.extend(lines);
    }

    Rendered {
        json: Value::Object(root),
        human,
    }
}

/// Render a scanned QR code, inspecting merchant payloads when recognised.
pub fn render_scan(code: &ScannedCode) -> Rendered {
    let mut root = Map::new();
    root.insert(
        "qr".to_string(),
        json!({
            "text": code.as_str(),
            "bytes_hex": hex_encode(code.as_bytes()),
            "byte_length": code.as_bytes().len(),
        }),
    );

    let mut human = Vec::new();
    match code.as_str() {
        Some(text) => human.push(format!("QR text: {text}")),
        None => human.push(format!(
            "QR binary payload ({} bytes)",
            code.as_bytes().len()
        )),
    }

    match code.as_str() {
        Some(text) if MerchantPayload::looks_like(text) => {
            let (value, lines) = merchant_section(text);
            root.insert("merchant".to_string(), value);
            human.extend(lines);
        }
        _ => {
            root.insert("merchant".to_string(), Value::Null);
        }
    }

    Rendered {
        json: Value::Object(root),
        human,
    }
}

fn merchant_section(text: &str) -> (Value, Vec<String>) {
    match MerchantPayload::parse(text) {
        Ok(merchant) => (merchant_value(&merchant), merchant_lines(&merchant)),
        Err(err) => (
            json!({ "error": err.to_string() }),
            vec![format!("  Failed to inspect merchant payload: {err}")],
        ),
    }
}

/// Produce a structured JSON representation of a merchant payload.
pub fn merchant_value(merchant: &MerchantPayload) -> Value {
    let segments: Vec<Value> = merchant
        .segments
        .iter()
        .map(|segment| {
            json!({
                "tag": segment.tag,
                "length": segment.value.len(),
                "value": segment.value,
            })
        })
        .collect();

    json!({
        "provider": merchant.provider,
        "number": merchant.number,
        "amount": merchant.amount,
        "reference": merchant.reference,
        "initiation": merchant.initiation,
        "currency": merchant.currency,
        "country": merchant.country,
        "crc": format_crc(merchant.crc),
        "crc_valid": merchant.crc_valid,
        "segments": segments,
    })
}

fn merchant_lines(merchant: &MerchantPayload) -> Vec<String> {
    let mut lines = vec![format!("{} merchant payload", merchant.provider)];
    lines.push(format!("  Receiver: {}", merchant.number));
    if let Some(amount) = &merchant.amount {
        lines.push(format!("  Amount: {amount} BDT"));
    }
    if let Some(reference) = &merchant.reference {
        lines.push(format!("  Reference: {reference}"));
    }
    lines.push(format!(
        "  CRC: {} ({})",
        format_crc(merchant.crc),
        if merchant.crc_valid { "valid" } else { "MISMATCH" }
    ));
    lines.extend(merchant.segments.iter().map(|segment| {
        format!(
            "    [{}] {} {}",
            segment.tag,
            segment.length_field(),
            segment.value
        )
    }));
    lines
}
