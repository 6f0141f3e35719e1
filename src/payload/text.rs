//! Pass-through payloads: free text, URLs and linear barcode data

use serde::{Deserialize, Serialize};

/// Free text or a URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRequest {
    /// Text to embed verbatim
    pub text: String,
}

/// Data for a linear barcode; the symbology is chosen by the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeRequest {
    /// Data to embed verbatim
    pub data: String,
}

pub(super) fn encode_text(request: &TextRequest) -> Option<String> {
    non_empty(&request.text)
}

pub(super) fn encode_barcode(request: &BarcodeRequest) -> Option<String> {
    non_empty(&request.data)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
