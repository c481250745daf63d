#![no_main]

use libfuzzer_sys::fuzz_target;
use fixbug_inventory::DescriptorParser;

fuzz_target!(|data: &[u8]| {
    let parser = DescriptorParser;
    if let Ok(record) = parser.parse(data, "fuzz.zip/inventory.xml") {
        // number가 비어 있는 버그는 파서에서 걸러져야 함
        assert!(record.bugs.iter().all(|b| !b.number.is_empty()));
    }
});
