//! bKash / Nagad merchant QR payloads
//!
//! Assembles the TLV segments described in [`crate::emv::merchant`], then
//! appends the CRC-16 of everything up to and including `6304`.

use crate::emv::crc::crc16_hex;
use crate::emv::merchant::{
    self as layout, CRC_PREFIX, MAX_ACCOUNT_DIGITS, MAX_AMOUNT_LEN, MAX_REFERENCE_LEN,
    MerchantProvider, tags,
};
use crate::emv::tlv::{self, Segment};
use serde::{Deserialize, Serialize};

/// Payment request to a bKash or Nagad personal/merchant account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantRequest {
    /// Receiver phone number; non-digits are stripped
    pub number: String,
    /// Requested amount in taka
    pub amount: Option<f64>,
    /// Payment reference; only bKash carries it, filtered to ASCII alphanumerics
    pub reference: String,
}

/// Format an amount with exactly two fraction digits.
///
/// Returns `None` for non-finite values and for amounts too long for tag `54`.
/// Negative amounts are formatted as-is.
pub fn format_amount(amount: f64) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }
    let formatted = format!("{amount:.2}");
    (formatted.len() <= MAX_AMOUNT_LEN).then_some(formatted)
}

pub(super) fn encode(provider: MerchantProvider, request: &MerchantRequest) -> Option<String> {
    let number: String = request
        .number
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_ACCOUNT_DIGITS)
        .collect();
    if number.is_empty() {
        return None;
    }

    let mut segments = vec![
        Segment::new(tags::PAYLOAD_FORMAT, layout::PAYLOAD_FORMAT_VERSION),
        Segment::new(tags::POINT_OF_INITIATION, layout::DYNAMIC_INITIATION),
        Segment::template(
            tags::MERCHANT_ACCOUNT,
            &[
                Segment::new(tags::ACCOUNT_GUID, provider.identifier()),
                Segment::new(provider.account_tag(), number),
            ],
        ),
        Segment::new(tags::CATEGORY_CODE, layout::CATEGORY_CODE),
        Segment::new(tags::CURRENCY, layout::CURRENCY_BDT),
    ];

    if let Some(amount) = request.amount {
        match format_amount(amount) {
            Some(formatted) => segments.push(Segment::new(tags::AMOUNT, formatted)),
            None => tracing::warn!(amount, "Omitting amount that does not fit tag 54"),
        }
    }

    let reference: String = if provider.carries_reference() {
        request
            .reference
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(MAX_REFERENCE_LEN)
            .collect()
    } else {
        String::new()
    };
    if !reference.is_empty() {
        segments.push(Segment::new(tags::REFERENCE, reference.as_str()));
    }

    segments.push(Segment::new(tags::COUNTRY, layout::COUNTRY_BD));

    if !reference.is_empty() {
        segments.push(Segment::template(
            tags::ADDITIONAL_DATA,
            &[Segment::new(tags::BILL_NUMBER, reference.as_str())],
        ));
    }

    let mut payload = tlv::serialize(&segments);
    payload.push_str(CRC_PREFIX);
    let crc = crc16_hex(&payload);
    payload.push_str(&crc);

    Some(payload)
}
