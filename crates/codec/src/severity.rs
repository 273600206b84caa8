//! 심각도 정규화
//!
//! CEF 헤더의 심각도는 0~10 범위의 정수 문자열이어야 합니다.
//! 소수부가 0인 숫자("5.0")는 정수형("5")으로 고쳐 쓰고,
//! 범위를 벗어나거나 해석할 수 없는 값은 기본값으로 대체합니다.
//! 호출자에게 에러를 돌려주는 일은 없습니다.

/// 심각도 기본값. 설정이 비정상일 때도 이 값으로 메시지를 완성한다.
pub const DEFAULT_SEVERITY: &str = "6";

/// 심각도 문자열 정규화기
#[derive(Debug, Clone)]
pub struct SeverityNormalizer {
    default: String,
}

impl SeverityNormalizer {
    /// 대체용 기본값을 지정해 생성한다.
    ///
    /// 기본값도 같은 규칙으로 정수 문자열로 고쳐 쓴다. 기본값 자체가
    /// 유효하지 않으면 [`DEFAULT_SEVERITY`]를 쓴다.
    pub fn new(default: impl Into<String>) -> Self {
        let default =
            canonical(&default.into()).unwrap_or_else(|| DEFAULT_SEVERITY.to_owned());
        Self { default }
    }

    /// 값을 정수 문자열로 정규화한다. 유효하지 않으면 기본값을 낸다.
    pub fn normalize(&self, value: &str) -> String {
        canonical(value).unwrap_or_else(|| self.default.clone())
    }
}

/// 유효한 심각도면 정수 문자열로 고쳐 써서 돌려준다.
///
/// 유효 조건: 숫자로 해석 가능, 소수부가 정확히 0, 0..=10 범위.
fn canonical(value: &str) -> Option<String> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.fract() == 0.0 && (0.0..=10.0).contains(&n) => {
            Some(format!("{}", n as i64))
        }
        _ => None,
    }
}

impl Default for SeverityNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SEVERITY)
    }
}
