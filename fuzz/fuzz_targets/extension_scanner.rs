#![no_main]

use libfuzzer_sys::fuzz_target;

use cefbridge_codec::extension::ExtensionScanner;

fuzz_target!(|data: &str| {
    let scanner = ExtensionScanner::new().expect("key pattern must compile");

    // 키는 항상 단어 문자로 시작하고, 패닉은 없어야 한다
    for (key, _) in scanner.scan(data) {
        let first = key.chars().next().expect("scanned key is never empty");
        assert!(first.is_ascii_alphanumeric() || first == '_');
    }
});
