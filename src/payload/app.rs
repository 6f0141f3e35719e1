//! App store download links

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How to encode a request that carries both store links
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppDownloadPolicy {
    /// Embed a single URL, the Android one when both are present
    #[default]
    PreferAndroid,
    /// Embed `ANDROID:<url>` and `IOS:<url>` lines
    BothLines,
}

impl AppDownloadPolicy {
    /// Parse a policy identifier (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().replace('_', "-").as_str() {
            "prefer-android" | "android" => Some(Self::PreferAndroid),
            "both-lines" | "both" => Some(Self::BothLines),
            _ => None,
        }
    }
}

impl fmt::Display for AppDownloadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreferAndroid => "prefer-android",
            Self::BothLines => "both-lines",
        })
    }
}

impl FromStr for AppDownloadPolicy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unsupported app download policy '{value}', expected 'prefer-android' or 'both-lines'")
        })
    }
}

/// Store links for one app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppDownloadRequest {
    /// Google Play URL
    pub android_url: String,
    /// App Store URL
    pub ios_url: String,
}

pub(super) fn encode(request: &AppDownloadRequest, policy: AppDownloadPolicy) -> Option<String> {
    let android = Some(request.android_url.as_str()).filter(|url| !url.is_empty());
    let ios = Some(request.ios_url.as_str()).filter(|url| !url.is_empty());
    if android.is_none() && ios.is_none() {
        return None;
    }

    match policy {
        AppDownloadPolicy::PreferAndroid => android.or(ios).map(str::to_string),
        AppDownloadPolicy::BothLines => {
            let mut text = String::new();
            if let Some(url) = android {
                text.push_str(&format!("ANDROID:{url}\n"));
            }
            if let Some(url) = ios {
                text.push_str(&format!("IOS:{url}\n"));
            }
            Some(text)
        }
    }
}
