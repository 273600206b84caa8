#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cefbridge_codec::config::CefCodecConfigBuilder;
use cefbridge_codec::decoder::CefDecoder;
use cefbridge_codec::encoder::CefEncoder;
use cefbridge_core::event::{Event, FieldPath, FieldValue};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    source_ip: String,
    message: String,
}

/// 공백/이스케이프 모호성이 없는 값인지 판단한다.
///
/// 이런 값은 인코딩-디코딩 왕복에서 원문이 보존되어야 한다.
fn is_unambiguous(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 1024
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | ':' | '-' | '_'))
}

fuzz_target!(|input: FuzzInput| {
    let config = CefCodecConfigBuilder::new()
        .field("source.ip")
        .field("message")
        .build()
        .expect("fixed config must build");
    let encoder = CefEncoder::new(config.clone()).expect("encoder must build");
    let decoder = CefDecoder::new(config).expect("decoder must build");

    let source_path = FieldPath::parse("source.ip").expect("fixed path must parse");
    let message_path = FieldPath::parse("message").expect("fixed path must parse");

    let mut event = Event::new();
    event.insert(&source_path, FieldValue::Text(input.source_ip.clone()));
    event.insert(&message_path, FieldValue::Text(input.message.clone()));

    // 인코딩은 어떤 값에도 성공해야 한다
    let encoded = encoder.encode(&event).expect("encode never fails on text");
    assert!(encoded.starts_with("CEF:0|"));

    // 되돌린 이벤트는 패닉 없이 나와야 하고, 모호하지 않은 값은 보존된다
    let decoded = decoder.decode(encoded.as_bytes());
    if is_unambiguous(&input.source_ip) && is_unambiguous(&input.message) {
        let text_at = |path: &FieldPath| {
            decoded
                .get(path)
                .and_then(|v| v.as_text())
                .map(str::to_owned)
        };
        assert_eq!(text_at(&source_path).as_deref(), Some(input.source_ip.as_str()));
        assert_eq!(text_at(&message_path).as_deref(), Some(input.message.as_str()));
    }
});
