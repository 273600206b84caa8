//! 메트릭 상수 및 설명 등록
//!
//! 모든 Prometheus 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 코덱 구현은 이 상수를 사용하여 `metrics::counter!()`,
//! `metrics::histogram!()` 매크로를 호출합니다. 전역 레코더가 설치되지
//! 않은 경우 모든 호출은 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `cefbridge_`
//! - 모듈명: `codec_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(cefbridge_core::metrics::CODEC_MESSAGES_DECODED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 결과 레이블 키 (ok, error)
pub const LABEL_RESULT: &str = "result";

// ─── Codec 메트릭 ──────────────────────────────────────────────────

/// Codec: 디코딩 성공 메시지 수 (counter)
pub const CODEC_MESSAGES_DECODED_TOTAL: &str = "cefbridge_codec_messages_decoded_total";

/// Codec: 디코딩 실패(폴백 이벤트 생성) 수 (counter)
pub const CODEC_DECODE_FAILURES_TOTAL: &str = "cefbridge_codec_decode_failures_total";

/// Codec: 인코딩 성공 메시지 수 (counter)
pub const CODEC_MESSAGES_ENCODED_TOTAL: &str = "cefbridge_codec_messages_encoded_total";

/// Codec: 인코딩 실패 수 (counter)
pub const CODEC_ENCODE_FAILURES_TOTAL: &str = "cefbridge_codec_encode_failures_total";

/// Codec: 파싱된 확장 key=value 쌍 수 (counter)
pub const CODEC_EXTENSION_PAIRS_TOTAL: &str = "cefbridge_codec_extension_pairs_total";

/// Codec: 메시지 디코딩 소요 시간 (histogram, 초)
pub const CODEC_DECODE_DURATION_SECONDS: &str = "cefbridge_codec_decode_duration_seconds";

/// Codec: 메시지 인코딩 소요 시간 (histogram, 초)
pub const CODEC_ENCODE_DURATION_SECONDS: &str = "cefbridge_codec_encode_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// `metrics::describe_counter!()`, `describe_histogram!()`을 호출하여
/// Prometheus HELP 텍스트를 설정합니다.
///
/// 이 함수는 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        CODEC_MESSAGES_DECODED_TOTAL,
        "Total number of messages successfully decoded into events"
    );
    describe_counter!(
        CODEC_DECODE_FAILURES_TOTAL,
        "Total number of messages that produced a fallback event"
    );
    describe_counter!(
        CODEC_MESSAGES_ENCODED_TOTAL,
        "Total number of events successfully encoded into messages"
    );
    describe_counter!(
        CODEC_ENCODE_FAILURES_TOTAL,
        "Total number of failed encode attempts"
    );
    describe_counter!(
        CODEC_EXTENSION_PAIRS_TOTAL,
        "Total number of extension key=value pairs parsed"
    );
    describe_histogram!(
        CODEC_DECODE_DURATION_SECONDS,
        "Time to decode a single message in seconds"
    );
    describe_histogram!(
        CODEC_ENCODE_DURATION_SECONDS,
        "Time to encode a single event in seconds"
    );
}
