//! 도메인 타입 -- inventory.xml에서 추출되는 패치/버그 레코드

use std::fmt;

use serde::{Deserialize, Serialize};

/// 단일 Fixed Bug 항목
///
/// inventory.xml의 `<bug number=".." description=".."/>` 요소 하나에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BugRecord {
    /// 버그 번호 (`number` 속성)
    pub number: String,
    /// 버그 설명 (`description` 속성, 없으면 빈 문자열)
    pub description: String,
}

impl BugRecord {
    /// 번호와 설명으로 레코드를 생성합니다.
    pub fn new(number: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            description: description.into(),
        }
    }
}

/// 리포트 버그 라인의 본문 (`BUG <번호> - <설명>`)
impl fmt::Display for BugRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BUG {} - {}", self.number, self.description)
    }
}

/// inventory.xml 하나의 파싱 결과
///
/// 패치 설명과 문서 순서대로의 버그 목록을 담습니다. 생성 후 변경하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRecord {
    /// `patch_description` 요소의 텍스트 (없으면 빈 문자열)
    pub patch_description: String,
    /// 버그 목록 (문서 순서)
    pub bugs: Vec<BugRecord>,
}

impl PatchRecord {
    /// 패치 설명도 버그도 없는 레코드인지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.patch_description.is_empty() && self.bugs.is_empty()
    }

    /// 버그 항목 수를 반환합니다.
    pub fn bug_count(&self) -> usize {
        self.bugs.len()
    }
}
