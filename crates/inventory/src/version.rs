//! 파일명 버전 추출 -- 자연 정렬 키
//!
//! `p35643107_190000_Linux-x86-64_RU_19.21.zip` 같은 파일명에서
//! 표식(`RU_`) 뒤의 버전 토큰을 꺼내고, 숫자 구간을 정수 시퀀스로 바꿔
//! `19.4 < 19.10` 순서가 되도록 비교합니다.

use std::path::Path;

/// 자연 정렬 키
///
/// 필드 순서대로 비교합니다: 먼저 숫자 시퀀스(사전식, 짧은 접두사가 먼저),
/// 같으면 원본 토큰 문자열.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    /// 토큰에서 추출한 숫자 구간들 (`u64` 범위를 넘으면 `u64::MAX`로 포화)
    pub segments: Vec<u64>,
    /// 원본 버전 토큰
    pub token: String,
}

impl VersionKey {
    /// 버전 토큰에서 키를 생성합니다.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let segments = numeric_segments(&token);
        Self { segments, token }
    }
}

/// 경로에서 디렉토리와 확장자를 제거한 파일명을 반환합니다.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 경로에서 버전 토큰을 추출합니다.
///
/// 파일명에 `marker`가 있으면 첫 등장 이후 전체, 없으면 파일명 전체를 반환합니다.
/// 빈 `marker`는 "표식 없음"으로 취급합니다.
pub fn version_token(path: &Path, marker: &str) -> String {
    let stem = file_stem(path);
    strip_marker(&stem, marker).to_owned()
}

/// 경로에서 자연 정렬 키를 생성합니다.
pub fn version_key(path: &Path, marker: &str) -> VersionKey {
    VersionKey::from_token(version_token(path, marker))
}

fn strip_marker<'a>(name: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return name;
    }
    match name.split_once(marker) {
        Some((_, rest)) => rest,
        None => name,
    }
}

/// 문자열의 연속된 ASCII 숫자 구간을 정수로 변환합니다.
fn numeric_segments(token: &str) -> Vec<u64> {
    token
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}
