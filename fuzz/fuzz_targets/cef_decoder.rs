#![no_main]

use libfuzzer_sys::fuzz_target;

use cefbridge_codec::config::CefCodecConfig;
use cefbridge_codec::decoder::CefDecoder;

fuzz_target!(|data: &[u8]| {
    let decoder = CefDecoder::new(CefCodecConfig::default()).expect("default config must build");

    // 어떤 바이트 입력에도 패닉 없이 이벤트(성공 또는 폴백)를 내야 한다
    let _ = decoder.decode(data);
});
