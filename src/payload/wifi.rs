//! WiFi network credentials in the `WIFI:` URI layout understood by phone cameras

use serde::{Deserialize, Serialize};

/// WiFi network to join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiRequest {
    /// Network name
    pub ssid: String,
    /// Network password
    pub password: String,
    /// Authentication type (`WPA`, `WEP`, `nopass`)
    pub encryption: String,
    /// Whether the network hides its SSID
    pub hidden: bool,
}

impl Default for WifiRequest {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            encryption: "WPA".to_string(),
            hidden: false,
        }
    }
}

pub(super) fn encode(request: &WifiRequest) -> Option<String> {
    if request.ssid.is_empty() {
        return None;
    }

    Some(format!(
        "WIFI:S:{};T:{};P:{};H:{};",
        request.ssid, request.encryption, request.password, request.hidden
    ))
}
