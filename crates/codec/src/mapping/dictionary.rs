//! CEF 필드 사전
//!
//! 각 행은 (전체 이름, 축약 키, ECS 모드 대상 경로)입니다. 축약형이
//! 없는 필드는 전체 이름을 키 자리에 반복합니다. 대상 경로의
//! `{device}` 자리표시자는 테이블 구축 시점에 설정된 장비 역할
//! (observer/host)로 치환됩니다.
//!
//! 행 순서는 디코드 인덱스의 충돌 우선순위를 결정하므로 고정입니다.
//! 새 항목은 해당 패밀리 블록의 알파벳 순서 자리에 추가하십시오.

/// 장비 역할로 치환되는 자리표시자
pub(crate) const DEVICE_PLACEHOLDER: &str = "{device}";

/// (전체 이름, 축약 키, ECS 대상 경로 템플릿)
pub(crate) const FIELD_DICTIONARY: &[(&str, &str, &str)] = &[
    // 헤더 슬롯
    ("cefVersion", "cefVersion", "cef.version"),
    ("deviceVendor", "deviceVendor", "observer.vendor"),
    ("deviceProduct", "deviceProduct", "observer.product"),
    ("deviceVersion", "deviceVersion", "observer.version"),
    ("deviceEventClassId", "deviceEventClassId", "event.code"),
    ("name", "name", "cef.name"),
    ("severity", "severity", "event.severity"),
    ("syslog", "syslog", "cef.syslog"),
    // 에이전트
    ("agentAddress", "agt", "agent.ip"),
    ("agentDnsDomain", "agentDnsDomain", "cef.agent_dns_domain"),
    ("agentHostName", "ahost", "agent.name"),
    ("agentId", "aid", "agent.id"),
    ("agentMacAddress", "amac", "agent.mac"),
    ("agentNtDomain", "agentNtDomain", "cef.agent_nt_domain"),
    ("agentReceiptTime", "art", "event.created"),
    ("agentTimeZone", "atz", "cef.agent_timezone"),
    ("agentTranslatedAddress", "agentTranslatedAddress", "cef.agent_translated_address"),
    ("agentTranslatedZoneExternalID", "agentTranslatedZoneExternalID", "cef.agent_translated_zone_external_id"),
    ("agentTranslatedZoneURI", "agentTranslatedZoneURI", "cef.agent_translated_zone_uri"),
    ("agentType", "at", "agent.type"),
    ("agentVersion", "av", "agent.version"),
    ("agentZoneExternalID", "agentZoneExternalID", "cef.agent_zone_external_id"),
    ("agentZoneURI", "agentZoneURI", "cef.agent_zone_uri"),
    // 프로토콜/카운트
    ("applicationProtocol", "app", "network.protocol"),
    ("baseEventCount", "cnt", "cef.base_event_count"),
    ("bytesIn", "in", "source.bytes"),
    ("bytesOut", "out", "destination.bytes"),
    ("customerExternalID", "customerExternalID", "organization.id"),
    ("customerURI", "customerURI", "organization.name"),
    // 목적지
    ("destinationAddress", "dst", "destination.ip"),
    ("destinationDnsDomain", "destinationDnsDomain", "cef.destination_dns_domain"),
    ("destinationGeoLatitude", "dlat", "destination.geo.location.lat"),
    ("destinationGeoLongitude", "dlong", "destination.geo.location.lon"),
    ("destinationHostName", "dhost", "destination.domain"),
    ("destinationMacAddress", "dmac", "destination.mac"),
    ("destinationNtDomain", "dntdom", "destination.registered_domain"),
    ("destinationPort", "dpt", "destination.port"),
    ("destinationProcessId", "dpid", "destination.process.pid"),
    ("destinationProcessName", "dproc", "destination.process.name"),
    ("destinationServiceName", "destinationServiceName", "cef.destination_service_name"),
    ("destinationTranslatedAddress", "destinationTranslatedAddress", "destination.nat.ip"),
    ("destinationTranslatedPort", "destinationTranslatedPort", "destination.nat.port"),
    ("destinationTranslatedZoneExternalID", "destinationTranslatedZoneExternalID", "cef.destination_translated_zone_external_id"),
    ("destinationTranslatedZoneURI", "destinationTranslatedZoneURI", "cef.destination_translated_zone_uri"),
    ("destinationUserId", "duid", "destination.user.id"),
    ("destinationUserName", "duser", "destination.user.name"),
    ("destinationUserPrivileges", "dpriv", "destination.user.group.name"),
    ("destinationZoneExternalID", "destinationZoneExternalID", "cef.destination_zone_external_id"),
    ("destinationZoneURI", "destinationZoneURI", "cef.destination_zone_uri"),
    // 장비
    ("deviceAction", "act", "event.action"),
    ("deviceAddress", "dvc", "{device}.ip"),
    ("deviceCustomDate1", "deviceCustomDate1", "cef.device_custom_date_1"),
    ("deviceCustomDate1Label", "deviceCustomDate1Label", "cef.device_custom_date_1_label"),
    ("deviceCustomDate2", "deviceCustomDate2", "cef.device_custom_date_2"),
    ("deviceCustomDate2Label", "deviceCustomDate2Label", "cef.device_custom_date_2_label"),
    ("deviceCustomFloatingPoint1", "cfp1", "cef.device_custom_floating_point_1"),
    ("deviceCustomFloatingPoint1Label", "cfp1Label", "cef.device_custom_floating_point_1_label"),
    ("deviceCustomFloatingPoint2", "cfp2", "cef.device_custom_floating_point_2"),
    ("deviceCustomFloatingPoint2Label", "cfp2Label", "cef.device_custom_floating_point_2_label"),
    ("deviceCustomFloatingPoint3", "cfp3", "cef.device_custom_floating_point_3"),
    ("deviceCustomFloatingPoint3Label", "cfp3Label", "cef.device_custom_floating_point_3_label"),
    ("deviceCustomFloatingPoint4", "cfp4", "cef.device_custom_floating_point_4"),
    ("deviceCustomFloatingPoint4Label", "cfp4Label", "cef.device_custom_floating_point_4_label"),
    ("deviceCustomIPv6Address1", "c6a1", "cef.device_custom_ipv6_address_1"),
    ("deviceCustomIPv6Address1Label", "c6a1Label", "cef.device_custom_ipv6_address_1_label"),
    ("deviceCustomIPv6Address2", "c6a2", "cef.device_custom_ipv6_address_2"),
    ("deviceCustomIPv6Address2Label", "c6a2Label", "cef.device_custom_ipv6_address_2_label"),
    ("deviceCustomIPv6Address3", "c6a3", "cef.device_custom_ipv6_address_3"),
    ("deviceCustomIPv6Address3Label", "c6a3Label", "cef.device_custom_ipv6_address_3_label"),
    ("deviceCustomIPv6Address4", "c6a4", "cef.device_custom_ipv6_address_4"),
    ("deviceCustomIPv6Address4Label", "c6a4Label", "cef.device_custom_ipv6_address_4_label"),
    ("deviceCustomNumber1", "cn1", "cef.device_custom_number_1"),
    ("deviceCustomNumber1Label", "cn1Label", "cef.device_custom_number_1_label"),
    ("deviceCustomNumber2", "cn2", "cef.device_custom_number_2"),
    ("deviceCustomNumber2Label", "cn2Label", "cef.device_custom_number_2_label"),
    ("deviceCustomNumber3", "cn3", "cef.device_custom_number_3"),
    ("deviceCustomNumber3Label", "cn3Label", "cef.device_custom_number_3_label"),
    ("deviceCustomString1", "cs1", "cef.device_custom_string_1"),
    ("deviceCustomString1Label", "cs1Label", "cef.device_custom_string_1_label"),
    ("deviceCustomString2", "cs2", "cef.device_custom_string_2"),
    ("deviceCustomString2Label", "cs2Label", "cef.device_custom_string_2_label"),
    ("deviceCustomString3", "cs3", "cef.device_custom_string_3"),
    ("deviceCustomString3Label", "cs3Label", "cef.device_custom_string_3_label"),
    ("deviceCustomString4", "cs4", "cef.device_custom_string_4"),
    ("deviceCustomString4Label", "cs4Label", "cef.device_custom_string_4_label"),
    ("deviceCustomString5", "cs5", "cef.device_custom_string_5"),
    ("deviceCustomString5Label", "cs5Label", "cef.device_custom_string_5_label"),
    ("deviceCustomString6", "cs6", "cef.device_custom_string_6"),
    ("deviceCustomString6Label", "cs6Label", "cef.device_custom_string_6_label"),
    ("deviceDirection", "deviceDirection", "network.direction"),
    ("deviceDnsDomain", "deviceDnsDomain", "cef.device_dns_domain"),
    ("deviceEventCategory", "cat", "cef.category"),
    ("deviceExternalId", "deviceExternalId", "{device}.name"),
    ("deviceFacility", "deviceFacility", "log.syslog.facility.name"),
    ("deviceHostName", "dvchost", "{device}.hostname"),
    ("deviceInboundInterface", "deviceInboundInterface", "observer.ingress.interface.name"),
    ("deviceMacAddress", "dvcmac", "{device}.mac"),
    ("deviceNtDomain", "deviceNtDomain", "{device}.registered_domain"),
    ("deviceOutboundInterface", "deviceOutboundInterface", "observer.egress.interface.name"),
    ("devicePayloadId", "devicePayloadId", "cef.payload_id"),
    ("deviceProcessId", "dvcpid", "process.pid"),
    ("deviceProcessName", "deviceProcessName", "process.name"),
    ("deviceReceiptTime", "rt", "@timestamp"),
    ("deviceTimeZone", "dtz", "event.timezone"),
    ("deviceTranslatedAddress", "deviceTranslatedAddress", "cef.device_translated_address"),
    ("deviceTranslatedZoneExternalID", "deviceTranslatedZoneExternalID", "cef.device_translated_zone_external_id"),
    ("deviceTranslatedZoneURI", "deviceTranslatedZoneURI", "cef.device_translated_zone_uri"),
    ("deviceZoneExternalID", "deviceZoneExternalID", "cef.device_zone_external_id"),
    ("deviceZoneURI", "deviceZoneURI", "cef.device_zone_uri"),
    // 이벤트
    ("endTime", "end", "event.end"),
    ("eventId", "eventId", "event.id"),
    ("eventOutcome", "outcome", "event.outcome"),
    ("externalId", "externalId", "cef.external_id"),
    // 파일
    ("fileCreateTime", "fileCreateTime", "file.created"),
    ("fileHash", "fileHash", "file.hash"),
    ("fileId", "fileId", "file.inode"),
    ("fileModificationTime", "fileModificationTime", "file.mtime"),
    ("fileName", "fname", "file.name"),
    ("filePath", "filePath", "file.path"),
    ("filePermission", "filePermission", "cef.file_permission"),
    ("fileSize", "fsize", "file.size"),
    ("fileType", "fileType", "file.type"),
    // 플렉스
    ("flexDate1", "flexDate1", "cef.flex_date_1"),
    ("flexDate1Label", "flexDate1Label", "cef.flex_date_1_label"),
    ("flexNumber1", "flexNumber1", "cef.flex_number_1"),
    ("flexNumber1Label", "flexNumber1Label", "cef.flex_number_1_label"),
    ("flexNumber2", "flexNumber2", "cef.flex_number_2"),
    ("flexNumber2Label", "flexNumber2Label", "cef.flex_number_2_label"),
    ("flexString1", "flexString1", "cef.flex_string_1"),
    ("flexString1Label", "flexString1Label", "cef.flex_string_1_label"),
    ("flexString2", "flexString2", "cef.flex_string_2"),
    ("flexString2Label", "flexString2Label", "cef.flex_string_2_label"),
    // 메시지/관리
    ("managerReceiptTime", "mrt", "event.ingested"),
    ("message", "msg", "message"),
    ("oldFileCreateTime", "oldFileCreateTime", "cef.old_file_create_time"),
    ("oldFileHash", "oldFileHash", "cef.old_file_hash"),
    ("oldFileId", "oldFileId", "cef.old_file_id"),
    ("oldFileModificationTime", "oldFileModificationTime", "cef.old_file_modification_time"),
    ("oldFileName", "oldFileName", "cef.old_file_name"),
    ("oldFilePath", "oldFilePath", "cef.old_file_path"),
    ("oldFilePermission", "oldFilePermission", "cef.old_file_permission"),
    ("oldFileSize", "oldFileSize", "cef.old_file_size"),
    ("oldFileType", "oldFileType", "cef.old_file_type"),
    ("reason", "reason", "event.reason"),
    ("requestClientApplication", "requestClientApplication", "user_agent.original"),
    ("requestContext", "requestContext", "http.request.referrer"),
    ("requestCookies", "requestCookies", "cef.request_cookies"),
    ("requestMethod", "requestMethod", "http.request.method"),
    ("requestUrl", "request", "url.original"),
    // 출발지
    ("sourceAddress", "src", "source.ip"),
    ("sourceDnsDomain", "sourceDnsDomain", "cef.source_dns_domain"),
    ("sourceGeoLatitude", "slat", "source.geo.location.lat"),
    ("sourceGeoLongitude", "slong", "source.geo.location.lon"),
    ("sourceHostName", "shost", "source.domain"),
    ("sourceMacAddress", "smac", "source.mac"),
    ("sourceNtDomain", "sntdom", "source.registered_domain"),
    ("sourcePort", "spt", "source.port"),
    ("sourceProcessId", "spid", "source.process.pid"),
    ("sourceProcessName", "sproc", "source.process.name"),
    ("sourceServiceName", "sourceServiceName", "cef.source_service_name"),
    ("sourceTranslatedAddress", "sourceTranslatedAddress", "source.nat.ip"),
    ("sourceTranslatedPort", "sourceTranslatedPort", "source.nat.port"),
    ("sourceTranslatedZoneExternalID", "sourceTranslatedZoneExternalID", "cef.source_translated_zone_external_id"),
    ("sourceTranslatedZoneURI", "sourceTranslatedZoneURI", "cef.source_translated_zone_uri"),
    ("sourceUserId", "suid", "source.user.id"),
    ("sourceUserName", "suser", "source.user.name"),
    ("sourceUserPrivileges", "spriv", "source.user.group.name"),
    ("sourceZoneExternalID", "sourceZoneExternalID", "cef.source_zone_external_id"),
    ("sourceZoneURI", "sourceZoneURI", "cef.source_zone_uri"),
    // 기타
    ("startTime", "start", "event.start"),
    ("transportProtocol", "proto", "network.transport"),
    ("type", "type", "cef.type"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn long_names_are_unique() {
        let mut seen = HashSet::new();
        for (long, _, _) in FIELD_DICTIONARY {
            assert!(seen.insert(long), "duplicate long name: {long}");
        }
    }

    #[test]
    fn short_keys_do_not_collide_with_other_long_names() {
        let longs: HashSet<&str> = FIELD_DICTIONARY.iter().map(|(l, _, _)| *l).collect();
        for (long, key, _) in FIELD_DICTIONARY {
            if key != long {
                assert!(
                    !longs.contains(key),
                    "short key {key} shadows a long name"
                );
            }
        }
    }

    #[test]
    fn ecs_targets_are_unique() {
        let mut seen = HashSet::new();
        for (long, _, ecs) in FIELD_DICTIONARY {
            assert!(seen.insert(ecs), "duplicate ecs target for {long}: {ecs}");
        }
    }

    #[test]
    fn placeholder_only_in_device_family() {
        for (long, _, ecs) in FIELD_DICTIONARY {
            if ecs.contains(DEVICE_PLACEHOLDER) {
                assert!(long.starts_with("device"), "unexpected placeholder in {long}");
            }
        }
    }

    #[test]
    fn well_known_entries_present() {
        let find = |name: &str| {
            FIELD_DICTIONARY
                .iter()
                .find(|(long, key, _)| *long == name || *key == name)
                .copied()
        };
        assert_eq!(find("src"), Some(("sourceAddress", "src", "source.ip")));
        assert_eq!(find("rt"), Some(("deviceReceiptTime", "rt", "@timestamp")));
        assert_eq!(find("message"), Some(("message", "msg", "message")));
    }
}
