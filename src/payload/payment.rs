//! Payment links: PayPal "Buy Now" URLs and BIP 21 bitcoin URIs
//!
//! Amounts are passed through as typed; no currency conversion happens here.

use super::uri_component;
use serde::{Deserialize, Serialize};

const PAYPAL_ENDPOINT: &str = "https://www.paypal.com/cgi-bin/webscr?cmd=_xclick";

/// PayPal payment link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaypalRequest {
    /// Receiving PayPal account email
    pub email: String,
    /// Amount text
    pub amount: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// Item name shown on the checkout page
    pub item: String,
}

impl Default for PaypalRequest {
    fn default() -> Self {
        Self {
            email: String::new(),
            amount: String::new(),
            currency: "USD".to_string(),
            item: String::new(),
        }
    }
}

/// Bitcoin payment URI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitcoinRequest {
    /// Receiving address
    pub address: String,
    /// Amount in BTC
    pub amount: String,
    /// Message for the payer's wallet
    pub message: String,
}

pub(super) fn encode_paypal(request: &PaypalRequest) -> Option<String> {
    if request.email.is_empty() {
        return None;
    }

    let mut url = format!("{PAYPAL_ENDPOINT}&business={}", uri_component(&request.email));
    if !request.amount.is_empty() {
        url.push_str(&format!("&amount={}", uri_component(&request.amount)));
    }
    url.push_str(&format!("&currency_code={}", uri_component(&request.currency)));
    if !request.item.is_empty() {
        url.push_str(&format!("&item_name={}", uri_component(&request.item)));
    }

    Some(url)
}

pub(super) fn encode_bitcoin(request: &BitcoinRequest) -> Option<String> {
    if request.address.is_empty() {
        return None;
    }

    let mut params = Vec::new();
    if !request.amount.is_empty() {
        params.push(format!("amount={}", request.amount));
    }
    if !request.message.is_empty() {
        params.push(format!("message={}", uri_component(&request.message)));
    }

    let mut uri = format!("bitcoin:{}", request.address);
    if !params.is_empty() {
        uri.push('?');
        uri.push_str(&params.join("&"));
    }

    Some(uri)
}
