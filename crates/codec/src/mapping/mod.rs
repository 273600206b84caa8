//! 필드 매핑 테이블 -- CEF 이름과 이벤트 필드 경로의 상호 변환
//!
//! 하나의 필드는 세 가지 이름을 가집니다: 전체 이름(`sourceAddress`),
//! 축약 키(`src`), 대상 경로(`source.ip`). 테이블은 설정(장비 역할,
//! 호환 모드, 역방향 매핑)으로부터 한 번 구축되고 이후 불변이며,
//! 여러 디코더/인코더가 `Arc`로 공유해 동시 조회할 수 있습니다.

mod dictionary;

use std::collections::HashMap;

use serde::Serialize;

use cefbridge_core::event::FieldPath;

use crate::config::{CompatMode, DeviceRole};
use crate::error::CefCodecError;
use dictionary::{DEVICE_PLACEHOLDER, FIELD_DICTIONARY};

/// 해석이 끝난 매핑 한 행. CLI 출력용 뷰.
#[derive(Debug, Clone, Serialize)]
pub struct MappingEntry {
    /// 전체 이름
    pub long: &'static str,
    /// 축약 키 (축약형이 없으면 전체 이름과 동일)
    pub key: &'static str,
    /// 현재 모드/역할로 해석된 대상 경로
    pub target: String,
}

/// 불변 필드 매핑 테이블
///
/// - 디코드 인덱스: 전체 이름 또는 축약 키 -> 대상 경로.
///   짧은 키를 먼저, 전체 이름을 나중에 채우므로 충돌 시 전체
///   이름의 대상이 이기고, 같은 종류 안에서는 사전의 뒤 행이 이긴다.
/// - 인코드 인덱스: 대상 경로 또는 전체 이름 -> 출력 키.
///   역방향 매핑이 켜지면 축약 키를, 아니면 전체 이름을 낸다.
///   전체 이름 항목은 이미 있으면 덮어쓰지 않는다.
pub struct MappingTable {
    decode_index: HashMap<String, FieldPath>,
    encode_index: HashMap<String, String>,
    mode: CompatMode,
    device: DeviceRole,
    reverse_mapping: bool,
}

impl MappingTable {
    /// 사전과 설정으로부터 테이블을 구축한다.
    pub fn new(
        mode: CompatMode,
        device: DeviceRole,
        reverse_mapping: bool,
    ) -> Result<Self, CefCodecError> {
        let mut decode_index = HashMap::with_capacity(FIELD_DICTIONARY.len() * 2);
        for &(long, key, ecs) in FIELD_DICTIONARY {
            let target = parse_target(long, ecs, mode, device)?;
            decode_index.insert(key.to_string(), target);
        }
        for &(long, _, ecs) in FIELD_DICTIONARY {
            let target = parse_target(long, ecs, mode, device)?;
            decode_index.insert(long.to_string(), target);
        }

        let mut encode_index = HashMap::with_capacity(FIELD_DICTIONARY.len() * 2);
        for &(long, key, ecs) in FIELD_DICTIONARY {
            let output = if reverse_mapping { key } else { long };
            encode_index.insert(resolve_target(long, ecs, mode, device), output.to_string());
            encode_index
                .entry(long.to_string())
                .or_insert_with(|| output.to_string());
        }

        Ok(Self {
            decode_index,
            encode_index,
            mode,
            device,
            reverse_mapping,
        })
    }

    /// 전체 이름 또는 축약 키를 대상 경로로 푼다. 모르는 이름이면 `None`.
    pub fn decode_target(&self, name_or_key: &str) -> Option<&FieldPath> {
        self.decode_index.get(name_or_key)
    }

    /// 대상 경로 또는 전체 이름을 출력 키로 푼다. 모르는 이름이면 `None`.
    pub fn encode_key(&self, field: &str) -> Option<&str> {
        self.encode_index.get(field).map(String::as_str)
    }

    /// 테이블이 구축된 호환 모드
    pub fn mode(&self) -> CompatMode {
        self.mode
    }

    /// 테이블이 구축된 장비 역할
    pub fn device(&self) -> DeviceRole {
        self.device
    }

    /// 역방향 매핑(축약 키 출력) 여부
    pub fn reverse_mapping(&self) -> bool {
        self.reverse_mapping
    }

    /// 현재 설정으로 해석된 전체 매핑 행 목록 (사전 순서 유지)
    pub fn entries(&self) -> Vec<MappingEntry> {
        FIELD_DICTIONARY
            .iter()
            .map(|&(long, key, ecs)| MappingEntry {
                long,
                key,
                target: resolve_target(long, ecs, self.mode, self.device),
            })
            .collect()
    }
}

/// 모드/역할에 맞는 대상 경로 문자열을 만든다.
fn resolve_target(long: &str, ecs: &str, mode: CompatMode, device: DeviceRole) -> String {
    match mode {
        CompatMode::Legacy => long.to_string(),
        CompatMode::Ecs => ecs.replace(DEVICE_PLACEHOLDER, device.prefix()),
    }
}

fn parse_target(
    long: &str,
    ecs: &str,
    mode: CompatMode,
    device: DeviceRole,
) -> Result<FieldPath, CefCodecError> {
    FieldPath::parse(&resolve_target(long, ecs, mode, device)).map_err(|e| {
        CefCodecError::Config {
            field: long.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ecs_table() -> MappingTable {
        MappingTable::new(CompatMode::Ecs, DeviceRole::Observer, false).unwrap()
    }

    #[test]
    fn short_key_and_long_name_resolve_to_same_target() {
        let table = ecs_table();
        let expected = FieldPath::parse("source.ip").unwrap();
        assert_eq!(table.decode_target("src"), Some(&expected));
        assert_eq!(table.decode_target("sourceAddress"), Some(&expected));
    }

    #[test]
    fn legacy_mode_targets_flat_long_names() {
        let table = MappingTable::new(CompatMode::Legacy, DeviceRole::Observer, false).unwrap();
        let expected = FieldPath::parse("sourceAddress").unwrap();
        assert_eq!(table.decode_target("src"), Some(&expected));
    }

    #[test]
    fn device_role_resolves_placeholder() {
        let observer = ecs_table();
        let host = MappingTable::new(CompatMode::Ecs, DeviceRole::Host, false).unwrap();
        assert_eq!(
            observer.decode_target("dvc"),
            Some(&FieldPath::parse("observer.ip").unwrap())
        );
        assert_eq!(
            host.decode_target("dvc"),
            Some(&FieldPath::parse("host.ip").unwrap())
        );
    }

    #[test]
    fn receipt_time_targets_event_timestamp() {
        let table = ecs_table();
        let expected = FieldPath::parse("@timestamp").unwrap();
        assert_eq!(table.decode_target("rt"), Some(&expected));
        assert_eq!(table.decode_target("deviceReceiptTime"), Some(&expected));
    }

    #[test]
    fn unknown_name_returns_none() {
        let table = ecs_table();
        assert!(table.decode_target("definitelyNotAField").is_none());
    }

    #[test]
    fn encode_key_emits_long_name_by_default() {
        let table = ecs_table();
        assert_eq!(table.encode_key("source.ip"), Some("sourceAddress"));
    }

    #[test]
    fn encode_key_emits_short_key_when_reversed() {
        let table = MappingTable::new(CompatMode::Ecs, DeviceRole::Observer, true).unwrap();
        assert_eq!(table.encode_key("source.ip"), Some("src"));
        assert_eq!(table.encode_key("@timestamp"), Some("rt"));
    }

    #[test]
    fn encode_key_accepts_long_name_as_input() {
        let table = MappingTable::new(CompatMode::Ecs, DeviceRole::Observer, true).unwrap();
        assert_eq!(table.encode_key("sourceAddress"), Some("src"));
    }

    #[test]
    fn legacy_encode_key_round_trips() {
        let table = MappingTable::new(CompatMode::Legacy, DeviceRole::Observer, true).unwrap();
        assert_eq!(table.encode_key("sourceAddress"), Some("src"));
        assert_eq!(table.encode_key("deviceReceiptTime"), Some("rt"));
    }

    #[test]
    fn entries_follow_dictionary_order_and_size() {
        let table = ecs_table();
        let entries = table.entries();
        assert_eq!(entries[0].long, "cefVersion");
        assert!(entries.len() > 150);
        let src = entries.iter().find(|e| e.key == "src").unwrap();
        assert_eq!(src.target, "source.ip");
    }

    #[test]
    fn table_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MappingTable>();
    }
}
