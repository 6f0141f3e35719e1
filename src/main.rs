//! qrwiz command-line entrypoint

use clap::{Args, Parser, Subcommand};
use qrwiz::emv::crc16_hex;
use qrwiz::output::{Rendered, render_encoded, render_scan};
use qrwiz::payload::{
    AppDownloadRequest, BarcodeRequest, BitcoinRequest, EmailRequest, EventRequest,
    LocationRequest, MerchantRequest, PaypalRequest, PhoneRequest, SmsRequest, TextRequest,
    VcardRequest, WifiRequest,
};
use qrwiz::{
    ContentKind, ContentRequest, Error, ExportFormat, PayloadEncoder, QrDecoder, QrRenderer,
    QrwizConfig, Result, logging,
};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrwiz",
    version,
    about = "Build QR payloads (WiFi, contacts, payment links, bKash/Nagad merchant QR) and render them"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrwiz.{toml,yaml} in cwd/XDG config.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode form fields into a payload and optionally render it
    Encode {
        #[command(subcommand)]
        content: ContentArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Encode a JSON content request (`{"type": "wifi", ...}`) read from a file or `-` for stdin
    EncodeFile {
        /// Path to the JSON request
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Decode a QR image and inspect merchant payloads
    Inspect {
        /// Image containing a QR code
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Output results as formatted JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// Print the CRC-16/CCITT-FALSE of TEXT as 4 hex digits
    Crc {
        /// Text to checksum
        text: String,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Render the QR code to this file or directory (format from extension)
    #[arg(long, global = true, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Export format when PATH has no extension (png, jpg, svg)
    #[arg(long, global = true, value_name = "FORMAT")]
    format: Option<String>,

    /// Override rendered size in pixels
    #[arg(long, global = true, value_name = "PX")]
    size: Option<u32>,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ContentArgs {
    /// Plain text or URL
    TextUrl {
        #[arg(default_value_t)]
        text: String,
    },
    /// WiFi network credentials
    Wifi {
        #[arg(long, default_value_t)]
        ssid: String,
        #[arg(long, default_value_t)]
        password: String,
        #[arg(long, default_value = "WPA")]
        encryption: String,
        #[arg(long)]
        hidden: bool,
    },
    /// vCard contact
    Vcard {
        #[arg(long, default_value_t)]
        first_name: String,
        #[arg(long, default_value_t)]
        last_name: String,
        #[arg(long, default_value_t)]
        organization: String,
        #[arg(long, default_value_t)]
        title: String,
        #[arg(long, default_value_t)]
        phone: String,
        #[arg(long, default_value_t)]
        email: String,
        #[arg(long, default_value_t)]
        address: String,
        #[arg(long, default_value_t)]
        website: String,
    },
    /// mailto link
    Email {
        #[arg(long, default_value_t)]
        to: String,
        #[arg(long, default_value_t)]
        subject: String,
        #[arg(long, default_value_t)]
        body: String,
    },
    /// Prefilled SMS
    Sms {
        #[arg(long, default_value_t)]
        phone: String,
        #[arg(long, default_value_t)]
        message: String,
    },
    /// tel link
    Phone {
        #[arg(default_value_t)]
        number: String,
    },
    /// geo URI
    Location {
        #[arg(long, default_value_t, allow_hyphen_values = true)]
        latitude: String,
        #[arg(long, default_value_t, allow_hyphen_values = true)]
        longitude: String,
    },
    /// Calendar event (dates as RFC 3339 or YYYY-MM-DDTHH:MM, taken as UTC)
    Event {
        #[arg(long, default_value_t)]
        title: String,
        #[arg(long, default_value_t)]
        location: String,
        #[arg(long, default_value_t)]
        start: String,
        #[arg(long, default_value_t)]
        end: String,
        #[arg(long, default_value_t)]
        description: String,
    },
    /// PayPal payment link
    Paypal {
        #[arg(long, default_value_t)]
        email: String,
        #[arg(long, default_value_t)]
        amount: String,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long, default_value_t)]
        item: String,
    },
    /// Bitcoin payment URI
    Bitcoin {
        #[arg(long, default_value_t)]
        address: String,
        #[arg(long, default_value_t)]
        amount: String,
        #[arg(long, default_value_t)]
        message: String,
    },
    /// App store links
    AppDownload {
        #[arg(long, default_value_t)]
        android: String,
        #[arg(long, default_value_t)]
        ios: String,
    },
    /// bKash merchant QR
    Bkash {
        #[arg(long, default_value_t)]
        number: String,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long, default_value_t)]
        reference: String,
    },
    /// Nagad merchant QR (Nagad payloads carry no reference, so there is no --reference flag)
    Nagad {
        #[arg(long, default_value_t)]
        number: String,
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Raw barcode data (rendering is left to a barcode tool)
    Barcode {
        #[arg(default_value_t)]
        data: String,
    },
}

impl From<ContentArgs> for ContentRequest {
    fn from(args: ContentArgs) -> Self {
        type A = ContentArgs;
        match args {
            A::TextUrl { text } => Self::TextUrl(TextRequest { text }),
            A::Wifi {
                ssid,
                password,
                encryption,
                hidden,
            } => Self::Wifi(WifiRequest {
                ssid,
                password,
                encryption,
                hidden,
            }),
            A::Vcard {
                first_name,
                last_name,
                organization,
                title,
                phone,
                email,
                address,
                website,
            } => Self::Vcard(VcardRequest {
                first_name,
                last_name,
                organization,
                title,
                phone,
                email,
                address,
                website,
            }),
            A::Email { to, subject, body } => Self::Email(EmailRequest { to, subject, body }),
            A::Sms { phone, message } => Self::Sms(SmsRequest { phone, message }),
            A::Phone { number } => Self::Phone(PhoneRequest { number }),
            A::Location {
                latitude,
                longitude,
            } => Self::Location(LocationRequest {
                latitude,
                longitude,
            }),
            A::Event {
                title,
                location,
                start,
                end,
                description,
            } => Self::Event(EventRequest {
                title,
                location,
                start,
                end,
                description,
            }),
            A::Paypal {
                email,
                amount,
                currency,
                item,
            } => Self::Paypal(PaypalRequest {
                email,
                amount,
                currency,
                item,
            }),
            A::Bitcoin {
                address,
                amount,
                message,
            } => Self::Bitcoin(BitcoinRequest {
                address,
                amount,
                message,
            }),
            A::AppDownload { android, ios } => Self::AppDownload(AppDownloadRequest {
                android_url: android,
                ios_url: ios,
            }),
            A::Bkash {
                number,
                amount,
                reference,
            } => Self::Bkash(MerchantRequest {
                number,
                amount,
                reference,
            }),
            A::Nagad { number, amount } => Self::Nagad(MerchantRequest {
                number,
                amount,
                reference: String::new(),
            }),
            A::Barcode { data } => Self::Barcode(BarcodeRequest { data }),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = QrwizConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    match cli.command {
        Command::Encode { content, output } => handle_encode(content.into(), &output, &config),
        Command::EncodeFile { path, output } => {
            let request = read_request(&path)?;
            handle_encode(request, &output, &config)
        }
        Command::Inspect { image, json } => handle_inspect(&image, json),
        Command::Crc { text } => {
            println!("{}", crc16_hex(&text));
            Ok(())
        }
    }
}

fn read_request(path: &Path) -> Result<ContentRequest> {
    let text = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    Ok(serde_json::from_str(&text)?)
}

fn handle_encode(request: ContentRequest, args: &OutputArgs, config: &QrwizConfig) -> Result<()> {
    let kind = request.kind();
    let encoder = PayloadEncoder::from_options(&config.encoder);
    let payload = encoder.encode(&request);
    let mut rendered = render_encoded(kind, &payload);

    if let Some(out) = args.out.as_deref() {
        if !payload.is_empty() {
            let saved = save_code(kind, &payload, out, args, config)?;
            if let Value::Object(root) = &mut rendered.json {
                root.insert(
                    "output".to_string(),
                    Value::String(saved.display().to_string()),
                );
            }
            rendered.human.push(format!("Saved {}", saved.display()));
        }
    }

    emit(&rendered, args.json)
}

fn save_code(
    kind: ContentKind,
    payload: &qrwiz::EncodedPayload,
    out: &Path,
    args: &OutputArgs,
    config: &QrwizConfig,
) -> Result<PathBuf> {
    if !kind.is_qr() {
        return Err(Error::Other(
            "Barcode symbologies are not rendered by qrwiz; pass the payload to a barcode renderer"
                .to_string(),
        ));
    }

    let mut render_config = config.render_config()?;
    if let Some(format) = &args.format {
        render_config.format = format.parse::<ExportFormat>().map_err(Error::Config)?;
    }
    if let Some(size) = args.size {
        render_config.size = size.clamp(qrwiz::RenderConfig::MIN_SIZE, qrwiz::RenderConfig::MAX_SIZE);
    }

    let path = if out.is_dir() {
        out.join(kind.file_name(render_config.format.extension()))
    } else {
        out.to_path_buf()
    };

    info!(%kind, path = %path.display(), "Rendering QR code");
    QrRenderer::with_config(render_config).save(payload, &path)?;
    Ok(path)
}

fn handle_inspect(image: &Path, json: bool) -> Result<()> {
    let code = QrDecoder::new().decode_file(image)?;
    emit(&render_scan(&code), json)
}

fn emit(rendered: &Rendered, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(&rendered.json)
            .map_err(|e| Error::Other(format!("JSON error: {e}")))?;
        println!("{text}");
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_nagad_ignores_reference() {
        let cli = Cli::try_parse_from([
            "qrwiz", "encode", "nagad", "--number", "01712345678", "--amount", "50",
        ])
        .unwrap();
        let Command::Encode { content, .. } = cli.command else {
            panic!("expected encode command");
        };
        let ContentRequest::Nagad(request) = ContentRequest::from(content) else {
            panic!("expected nagad request");
        };
        assert_eq!(request.number, "01712345678");
        assert_eq!(request.amount, Some(50.0));
        assert!(request.reference.is_empty());

        assert!(
            Cli::try_parse_from(["qrwiz", "encode", "nagad", "--reference", "INV1"]).is_err()
        );
    }

    #[test]
    fn test_bkash_accepts_reference() {
        let cli = Cli::try_parse_from([
            "qrwiz", "encode", "bkash", "--number", "01712345678", "--reference", "INV1",
        ])
        .unwrap();
        let Command::Encode { content, .. } = cli.command else {
            panic!("expected encode command");
        };
        let ContentRequest::Bkash(request) = ContentRequest::from(content) else {
            panic!("expected bkash request");
        };
        assert_eq!(request.reference, "INV1");
    }
}
