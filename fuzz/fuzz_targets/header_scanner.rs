#![no_main]

use libfuzzer_sys::fuzz_target;

use cefbridge_codec::header::{HEADER_FIELD_COUNT, scan_header};

fuzz_target!(|data: &str| {
    let (fields, rest) = scan_header(data);

    // 슬롯은 7칸을 넘지 않고, 나머지는 항상 입력의 꼬리여야 한다
    assert!(fields.len() <= HEADER_FIELD_COUNT);
    assert!(rest.len() <= data.len());
});
