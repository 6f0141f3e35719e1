//! bKash / Nagad merchant QR layout and inspection
//!
//! Both providers follow the EMVCo merchant-presented layout with a few
//! provider-specific fields: the receiver account sub-tag inside the merchant
//! account template differs, and only bKash carries a reference (`05`) and a
//! bill number (`62`/`01`).

use crate::emv::crc::crc16;
use crate::emv::tlv::{self, Segment};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level and nested tags used by the merchant payload
pub mod tags {
    /// Payload format indicator
    pub const PAYLOAD_FORMAT: &str = "00";
    /// Point of initiation method
    pub const POINT_OF_INITIATION: &str = "01";
    /// Additional reference (bKash)
    pub const REFERENCE: &str = "05";
    /// Merchant account information template
    pub const MERCHANT_ACCOUNT: &str = "26";
    /// Merchant category code
    pub const CATEGORY_CODE: &str = "52";
    /// Transaction currency
    pub const CURRENCY: &str = "53";
    /// Transaction amount
    pub const AMOUNT: &str = "54";
    /// Country code
    pub const COUNTRY: &str = "58";
    /// Additional data field template
    pub const ADDITIONAL_DATA: &str = "62";
    /// CRC
    pub const CRC: &str = "63";

    /// Globally unique identifier inside the merchant account template
    pub const ACCOUNT_GUID: &str = "00";
    /// Bill number inside the additional data template
    pub const BILL_NUMBER: &str = "01";
}

/// Payload format indicator value
pub const PAYLOAD_FORMAT_VERSION: &str = "01";
/// Point of initiation: dynamic (amount may vary per code)
pub const DYNAMIC_INITIATION: &str = "12";
/// Merchant category code used for person-to-person requests
pub const CATEGORY_CODE: &str = "0000";
/// ISO 4217 numeric code for Bangladeshi taka
pub const CURRENCY_BDT: &str = "050";
/// ISO 3166 alpha-2 country code
pub const COUNTRY_BD: &str = "BD";
/// Tag + length of the CRC segment; the checksum covers it
pub const CRC_PREFIX: &str = "6304";

/// Longest receiver number kept, in digits
pub const MAX_ACCOUNT_DIGITS: usize = 20;
/// Longest reference / bill number kept
pub const MAX_REFERENCE_LEN: usize = 25;
/// Longest formatted amount accepted in tag `54`
pub const MAX_AMOUNT_LEN: usize = 13;

/// Bangladeshi mobile-money provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantProvider {
    /// bKash
    Bkash,
    /// Nagad
    Nagad,
}

impl MerchantProvider {
    /// Lowercase provider token (`bkash` / `nagad`)
    pub fn token(self) -> &'static str {
        match self {
            Self::Bkash => "bkash",
            Self::Nagad => "nagad",
        }
    }

    /// Reverse-domain identifier stored in the merchant account template
    pub fn identifier(self) -> String {
        format!("com.{}", self.token())
    }

    /// Sub-tag carrying the receiver account inside tag `26`
    pub fn account_tag(self) -> &'static str {
        match self {
            Self::Bkash => "01",
            Self::Nagad => "02",
        }
    }

    /// Whether the provider's layout includes reference and bill number fields
    pub fn carries_reference(self) -> bool {
        matches!(self, Self::Bkash)
    }

    /// Resolve a provider from its `com.<token>` identifier.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        identifier.strip_prefix("com.")?.parse().ok()
    }
}

impl fmt::Display for MerchantProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bkash => "bKash",
            Self::Nagad => "Nagad",
        })
    }
}

impl FromStr for MerchantProvider {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "bkash" => Ok(Self::Bkash),
            "nagad" => Ok(Self::Nagad),
            other => Err(format!(
                "Unknown merchant provider '{other}', expected bkash or nagad"
            )),
        }
    }
}

/// Fields recovered from a merchant QR payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantPayload {
    /// Provider named by the merchant account identifier
    pub provider: MerchantProvider,
    /// Receiver account number
    pub number: String,
    /// Formatted amount, if the payload carries one
    pub amount: Option<String>,
    /// Reference from tag `05`, falling back to the bill number in `62`
    pub reference: Option<String>,
    /// Point of initiation value (`11` static, `12` dynamic)
    pub initiation: String,
    /// Currency numeric code
    pub currency: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Checksum declared by the payload
    pub crc: u16,
    /// Whether the declared checksum matches the recomputed one
    pub crc_valid: bool,
    /// Top-level segments in payload order
    pub segments: Vec<Segment>,
}

impl MerchantPayload {
    /// Reparse a merchant payload and verify its checksum.
    ///
    /// Structural problems are errors; a checksum mismatch is reported through
    /// [`MerchantPayload::crc_valid`] so the fields can still be shown.
    pub fn parse(payload: &str) -> Result<Self> {
        let segments = tlv::parse(payload)?;

        let format = value_of(&segments, tags::PAYLOAD_FORMAT)
            .ok_or_else(|| Error::Tlv("missing payload format indicator".to_string()))?;
        if format != PAYLOAD_FORMAT_VERSION {
            return Err(Error::Tlv(format!(
                "unsupported payload format indicator '{format}'"
            )));
        }

        let crc_segment = segments
            .last()
            .filter(|segment| segment.tag == tags::CRC)
            .ok_or_else(|| Error::Tlv("payload does not end with a CRC segment".to_string()))?;
        if crc_segment.value.len() != 4 {
            return Err(Error::Tlv(format!(
                "CRC segment must hold 4 hex digits, found {}",
                crc_segment.value.len()
            )));
        }
        let crc = u16::from_str_radix(&crc_segment.value, 16)
            .map_err(|e| Error::Tlv(format!("invalid CRC '{}': {e}", crc_segment.value)))?;
        let crc_valid = crc16(&payload[..payload.len() - 4]) == crc;

        let account = tlv::find(&segments, tags::MERCHANT_ACCOUNT)
            .ok_or_else(|| Error::Tlv("missing merchant account template".to_string()))?
            .children()?;
        let identifier = value_of(&account, tags::ACCOUNT_GUID)
            .ok_or_else(|| Error::Tlv("missing merchant account identifier".to_string()))?;
        let provider = MerchantProvider::from_identifier(identifier).ok_or_else(|| {
            Error::Tlv(format!("unrecognised merchant identifier '{identifier}'"))
        })?;
        let number = value_of(&account, provider.account_tag())
            .ok_or_else(|| Error::Tlv(format!("missing {provider} receiver account")))?
            .to_string();

        let bill_number = match tlv::find(&segments, tags::ADDITIONAL_DATA) {
            Some(additional) => value_of(&additional.children()?, tags::BILL_NUMBER)
                .map(str::to_string),
            None => None,
        };
        let reference = value_of(&segments, tags::REFERENCE)
            .map(str::to_string)
            .or(bill_number);

        Ok(Self {
            provider,
            number,
            amount: value_of(&segments, tags::AMOUNT).map(str::to_string),
            reference,
            initiation: value_of(&segments, tags::POINT_OF_INITIATION)
                .unwrap_or_default()
                .to_string(),
            currency: value_of(&segments, tags::CURRENCY).map(str::to_string),
            country: value_of(&segments, tags::COUNTRY).map(str::to_string),
            crc,
            crc_valid,
            segments,
        })
    }

    /// Cheap shape check used before attempting a full parse.
    pub fn looks_like(payload: &str) -> bool {
        payload.starts_with("000201")
            && payload
                .len()
                .checked_sub(4)
                .and_then(|end| payload.get(..end))
                .is_some_and(|head| head.ends_with(CRC_PREFIX))
    }
}

fn value_of<'a>(segments: &'a [Segment], tag: &str) -> Option<&'a str> {
    tlv::find(segments, tag).map(|segment| segment.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emv::crc::crc16_hex;

    fn sign(prefix: &str) -> String {
        format!("{prefix}{}", crc16_hex(prefix))
    }

    #[test]
    fn test_provider_identifiers() {
        assert_eq!(MerchantProvider::Bkash.identifier(), "com.bkash");
        assert_eq!(
            MerchantProvider::from_identifier("com.nagad"),
            Some(MerchantProvider::Nagad)
        );
        assert_eq!(MerchantProvider::from_identifier("com.rocket"), None);
        assert_eq!(MerchantProvider::from_identifier("bkash"), None);
    }

    #[test]
    fn test_parse_signed_payload() {
        let payload = sign(
            "00020101021226280009com.nagad0211017123456785204000053030505802BD6304",
        );
        let parsed = MerchantPayload::parse(&payload).unwrap();
        assert_eq!(parsed.provider, MerchantProvider::Nagad);
        assert_eq!(parsed.number, "01712345678");
        assert_eq!(parsed.amount, None);
        assert_eq!(parsed.reference, None);
        assert_eq!(parsed.initiation, "12");
        assert_eq!(parsed.currency.as_deref(), Some("050"));
        assert_eq!(parsed.country.as_deref(), Some("BD"));
        assert!(parsed.crc_valid);
    }

    #[test]
    fn test_parse_detects_crc_mismatch() {
        let mut payload = sign(
            "00020101021226280009com.bkash0111017123456785204000053030505802BD6304",
        );
        let bad = if payload.ends_with('0') { "1" } else { "0" };
        payload.replace_range(payload.len() - 1.., bad);

        let parsed = MerchantPayload::parse(&payload).unwrap();
        assert!(!parsed.crc_valid);
    }

    #[test]
    fn test_parse_rejects_missing_crc() {
        let err = MerchantPayload::parse("00020101021258 02BD");
        assert!(err.is_err());
        assert!(matches!(
            MerchantPayload::parse("0002010102125802BD"),
            Err(Error::Tlv(_))
        ));
    }

    #[test]
    fn test_looks_like() {
        assert!(MerchantPayload::looks_like(&sign("0002010102125802BD6304")));
        assert!(!MerchantPayload::looks_like("WIFI:S:x;T:WPA;P:y;H:false;"));
        assert!(!MerchantPayload::looks_like("000201"));
    }

    #[test]
    fn test_looks_like_multibyte_text() {
        assert!(!MerchantPayload::looks_like("000201a€bc"));
        assert!(!MerchantPayload::looks_like("000201€"));
        assert!(!MerchantPayload::looks_like("000201 Dhaka ঢাকা"));
    }
}
