//! Build a few payloads and save them as QR codes
//!
//! Usage: cargo run --example generate_payloads

use qrwiz::payload::{MerchantRequest, WifiRequest};
use qrwiz::{ContentRequest, MerchantPayload, QrRenderer, encode};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let renderer = QrRenderer::new();

    let wifi = encode(&ContentRequest::Wifi(WifiRequest {
        ssid: "HomeNet".to_string(),
        password: "secret1".to_string(),
        ..WifiRequest::default()
    }));
    renderer.save(&wifi, Path::new("qr-code-wifi.png"))?;
    println!("✓ WiFi QR code saved to qr-code-wifi.png");
    println!("  Content: {wifi}");

    let bkash = encode(&ContentRequest::Bkash(MerchantRequest {
        number: "01712345678".to_string(),
        amount: Some(100.0),
        reference: "INV42".to_string(),
    }));
    renderer.save(&bkash, Path::new("qr-code-bkash.svg"))?;
    println!("✓ bKash QR code saved to qr-code-bkash.svg");
    println!("  Content: {bkash}");

    let inspected = MerchantPayload::parse(bkash.as_str())?;
    println!(
        "  Receiver {} / amount {:?} / CRC valid: {}",
        inspected.number, inspected.amount, inspected.crc_valid
    );

    Ok(())
}
