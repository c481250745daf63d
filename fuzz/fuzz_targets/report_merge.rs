#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use fixbug_core::types::{BugRecord, PatchRecord};
use fixbug_inventory::ReportBuilder;
use fixbug_inventory::report::BUG_PREFIX;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzDescriptor {
    patch_description: String,
    /// (번호, 설명) 목록
    bugs: Vec<(u16, String)>,
}

fuzz_target!(|descriptors: Vec<FuzzDescriptor>| {
    let mut builder = ReportBuilder::new();
    let mut expected = HashSet::new();

    for (i, d) in descriptors.iter().take(16).enumerate() {
        let record = PatchRecord {
            patch_description: d.patch_description.clone(),
            bugs: d
                .bugs
                .iter()
                .map(|(n, desc)| BugRecord::new(n.to_string(), desc.as_str()))
                .collect(),
        };
        if builder.push(&i.to_string(), &record) {
            expected.extend(d.bugs.iter().map(|(n, _)| *n));
        }
    }

    let report = builder.finish();
    assert_eq!(report.unique_bugs, expected.len());

    // 각 버그 번호는 최대 한 번만 출력
    let mut seen = HashSet::new();
    for line in report.lines.iter().filter(|l| l.starts_with(BUG_PREFIX)) {
        let number = line[BUG_PREFIX.len()..].trim_start().split(' ').next().unwrap_or("");
        assert!(seen.insert(number.to_owned()));
    }
});
