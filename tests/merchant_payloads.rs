use qrwiz::emv::tlv::{self, Segment};
use qrwiz::emv::{MerchantPayload, MerchantProvider, crc16, crc16_hex};
use qrwiz::payload::MerchantRequest;
use qrwiz::{ContentRequest, encode};

fn bkash(number: &str, amount: Option<f64>, reference: &str) -> ContentRequest {
    ContentRequest::Bkash(MerchantRequest {
        number: number.to_string(),
        amount,
        reference: reference.to_string(),
    })
}

fn nagad(number: &str, amount: Option<f64>) -> ContentRequest {
    ContentRequest::Nagad(MerchantRequest {
        number: number.to_string(),
        amount,
        reference: String::new(),
    })
}

fn assert_lengths_consistent(segments: &[Segment]) {
    for segment in segments {
        assert_eq!(segment.length_field(), format!("{:02}", segment.value.len()));
        if matches!(segment.tag.as_str(), "26" | "62") {
            assert_lengths_consistent(&segment.children().expect("nested template"));
        }
    }
}

#[test]
fn crc_known_vectors() {
    assert_eq!(crc16("123456789"), 0x29B1);
    assert_eq!(crc16(""), 0xFFFF);
}

#[test]
fn bkash_scenario_ends_with_its_own_checksum() {
    let payload = encode(&bkash("01712345678", Some(100.0), ""));
    let text = payload.as_str();

    assert!(text.starts_with("000201010212"));
    assert!(text.contains("26280009com.bkash011101712345678"));
    assert!(text.contains("5204000053030505406100.00"));
    assert!(text.contains("5802BD6304"));

    let (body, suffix) = text.split_at(text.len() - 4);
    assert!(body.ends_with("6304"));
    assert_eq!(suffix, crc16_hex(body));
    assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}

#[test]
fn tlv_stream_reparses_to_the_fields_that_were_set() {
    let cases = [
        (bkash("01712345678", Some(100.0), ""), MerchantProvider::Bkash, Some("100.00"), None),
        (bkash("017-1234-5678", None, "Order #99"), MerchantProvider::Bkash, None, Some("Order99")),
        (bkash("01712345678", Some(0.5), "A1"), MerchantProvider::Bkash, Some("0.50"), Some("A1")),
        (nagad("01812345678", Some(1999.999)), MerchantProvider::Nagad, Some("2000.00"), None),
        (nagad("01812345678", None), MerchantProvider::Nagad, None, None),
    ];

    for (request, provider, amount, reference) in cases {
        let payload = encode(&request);
        let segments = tlv::parse(payload.as_str()).expect("valid TLV stream");
        assert_lengths_consistent(&segments);
        assert_eq!(tlv::serialize(&segments), payload.as_str());

        let parsed = MerchantPayload::parse(payload.as_str()).expect("merchant payload");
        assert_eq!(parsed.provider, provider);
        assert!(parsed.number.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parsed.amount.as_deref(), amount);
        assert_eq!(parsed.reference.as_deref(), reference);
        assert_eq!(parsed.currency.as_deref(), Some("050"));
        assert_eq!(parsed.country.as_deref(), Some("BD"));
        assert!(parsed.crc_valid, "crc mismatch for {payload}");
    }
}

#[test]
fn segment_order_follows_layout() {
    let payload = encode(&bkash("01712345678", Some(42.0), "REF1"));
    let tags: Vec<String> = tlv::parse(payload.as_str())
        .unwrap()
        .into_iter()
        .map(|segment| segment.tag)
        .collect();
    assert_eq!(tags, ["00", "01", "26", "52", "53", "54", "05", "58", "62", "63"]);

    let payload = encode(&nagad("01812345678", None));
    let tags: Vec<String> = tlv::parse(payload.as_str())
        .unwrap()
        .into_iter()
        .map(|segment| segment.tag)
        .collect();
    assert_eq!(tags, ["00", "01", "26", "52", "53", "58", "63"]);
}

#[test]
fn receiver_number_is_required() {
    assert!(encode(&bkash("", Some(10.0), "REF")).is_empty());
    assert!(encode(&bkash("n/a", None, "")).is_empty());
    assert!(encode(&nagad("---", Some(10.0))).is_empty());
    assert!(!encode(&nagad("0", None)).is_empty());
}

#[test]
fn malformed_amounts_do_not_break_the_stream() {
    for amount in [-25.0, f64::NAN, 1e15, 0.005] {
        let payload = encode(&bkash("01712345678", Some(amount), ""));
        let parsed = MerchantPayload::parse(payload.as_str()).expect("still parseable");
        assert!(parsed.crc_valid);
    }
}

#[test]
fn tampering_is_detected() {
    let payload = encode(&bkash("01712345678", Some(100.0), ""));
    let tampered = payload.as_str().replace("100.00", "900.00");
    let parsed = MerchantPayload::parse(&tampered).unwrap();
    assert_eq!(parsed.amount.as_deref(), Some("900.00"));
    assert!(!parsed.crc_valid);
}
