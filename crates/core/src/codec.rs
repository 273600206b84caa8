//! 코덱 trait — 디코더/인코더 확장 포인트 정의

use crate::error::CefBridgeError;
use crate::event::Event;

/// 텍스트 메시지를 구조화 이벤트로 변환하는 trait
///
/// 새로운 입력 형식을 지원하려면 이 trait을 구현합니다.
pub trait EventDecoder: Send + Sync {
    /// 지원하는 형식 이름
    fn format_name(&self) -> &str;

    /// 원시 바이트를 이벤트로 디코딩
    ///
    /// 실패해도 에러를 반환하지 않고, 원문과 실패 태그를 담은
    /// 폴백 이벤트를 반환해야 합니다.
    fn decode(&self, raw: &[u8]) -> Event;
}

/// 구조화 이벤트를 텍스트 메시지로 변환하는 trait
///
/// 새로운 출력 형식을 지원하려면 이 trait을 구현합니다.
pub trait EventEncoder: Send + Sync {
    /// 지원하는 형식 이름
    fn format_name(&self) -> &str;

    /// 이벤트를 텍스트 메시지로 인코딩
    fn encode(&self, event: &Event) -> Result<String, CefBridgeError>;
}
