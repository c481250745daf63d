#![no_main]

use std::cmp::Ordering;
use std::path::Path;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use fixbug_inventory::{version_key, version_token};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    left: String,
    right: String,
    marker: String,
}

fuzz_target!(|input: FuzzInput| {
    let left = format!("{}.zip", input.left);
    let right = format!("{}.zip", input.right);
    let a = version_key(Path::new(&left), &input.marker);
    let b = version_key(Path::new(&right), &input.marker);

    // 전순서: 반대칭
    assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    assert_eq!(a.cmp(&a), Ordering::Equal);

    let _ = version_token(Path::new(&left), &input.marker);
});
