//! 리포트 빌더 -- 버그 중복 제거 및 출력 라인 생성
//!
//! [`ReportBuilder`]는 스캐너 순서대로 들어오는 [`PatchRecord`]를 누적합니다.
//! 같은 버그 번호는 실행 전체에서 처음 등장한 위치에만 출력됩니다.
//!
//! # 출력 형식
//!
//! ```text
//! ### RU 19.21
//!  *** Database Release Update : 19.21.0.0.231017 (35643107)
//!      BUG 29213893 - DBMS_STATS FAILING WITH ERROR ORA-01422
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use fixbug_core::types::{BugRecord, PatchRecord};
use regex::Regex;
use tracing::debug;

/// 헤더 라인 접두사
pub const HEADER_PREFIX: &str = "### RU";
/// 패치 설명 라인 표식
pub const DESCRIPTION_MARKER: &str = " ***";
/// 버그 라인 들여쓰기 ([`BugRecord`]의 `Display` 앞에 붙음)
const BUG_INDENT: &str = "     ";
/// 버그 라인 들여쓰기 + 표식
pub const BUG_PREFIX: &str = "     BUG";

/// patch_description 내 "Database Release Update : 19.21.0.0.231017" 형식
static SUB_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Database Release Update\s*:\s*([\d.]+)").expect("static regex is valid")
});

/// 완성된 리포트
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// 출력 라인 (각 라인은 `\n`으로 끝남)
    pub lines: Vec<String>,
    /// 마지막으로 발견한 DB RU 버전 (기본 파일명에 사용)
    pub latest_sub_version: Option<String>,
    /// 헤더를 출력한 descriptor 수
    pub descriptors_emitted: usize,
    /// 출력한 고유 버그 수
    pub unique_bugs: usize,
}

impl Report {
    /// 전체 라인을 하나의 문자열로 합칩니다.
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

/// 리포트 누적기
///
/// 실행 한 번 동안 seen-set과 출력 라인을 단독으로 소유합니다.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    seen: HashSet<String>,
    lines: Vec<String>,
    latest_sub_version: Option<String>,
    descriptors_emitted: usize,
}

impl ReportBuilder {
    /// 빈 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// descriptor 하나의 레코드를 추가합니다.
    ///
    /// 패치 설명이 비어 있으면 아무것도 출력하지 않고 `false`를 반환합니다.
    /// 버그가 하나도 없어도 헤더와 설명 라인은 출력합니다.
    pub fn push(&mut self, display_name: &str, record: &PatchRecord) -> bool {
        if record.patch_description.is_empty() {
            debug!(display_name, "empty patch description, skipping descriptor");
            return false;
        }

        self.lines.push(render_header(display_name));
        self.lines.push(render_description(&record.patch_description));
        self.descriptors_emitted += 1;

        if let Some(version) = extract_sub_version(&record.patch_description) {
            self.latest_sub_version = Some(version.to_owned());
        }

        let before = self.lines.len();
        for bug in &record.bugs {
            // 이전 descriptor 또는 같은 descriptor 앞쪽에서 이미 출력됨
            if !self.seen.insert(bug.number.clone()) {
                continue;
            }
            self.lines.push(render_bug(bug));
        }

        debug!(
            display_name,
            bugs = record.bugs.len(),
            new_bugs = self.lines.len() - before,
            "descriptor merged"
        );
        true
    }

    /// 지금까지의 출력 라인
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 마지막으로 발견한 DB RU 버전
    pub fn latest_sub_version(&self) -> Option<&str> {
        self.latest_sub_version.as_deref()
    }

    /// 헤더를 출력한 descriptor 수
    pub fn descriptors_emitted(&self) -> usize {
        self.descriptors_emitted
    }

    /// 출력한 고유 버그 수
    pub fn unique_bugs(&self) -> usize {
        self.seen.len()
    }

    /// 누적을 마치고 [`Report`]를 반환합니다.
    pub fn finish(self) -> Report {
        Report {
            unique_bugs: self.seen.len(),
            lines: self.lines,
            latest_sub_version: self.latest_sub_version,
            descriptors_emitted: self.descriptors_emitted,
        }
    }
}

/// patch_description에서 DB RU 버전을 추출합니다.
pub fn extract_sub_version(patch_description: &str) -> Option<&str> {
    SUB_VERSION_RE
        .captures(patch_description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn render_header(display_name: &str) -> String {
    format!("{HEADER_PREFIX} {display_name}\n")
}

fn render_description(patch_description: &str) -> String {
    format!("{DESCRIPTION_MARKER} {patch_description}\n")
}

fn render_bug(bug: &BugRecord) -> String {
    format!("{BUG_INDENT}{bug}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(text: &str, bugs: &[(&str, &str)]) -> PatchRecord {
        PatchRecord {
            patch_description: text.to_owned(),
            bugs: bugs.iter().map(|(n, d)| BugRecord::new(*n, *d)).collect(),
        }
    }

    #[test]
    fn renders_expected_line_format() {
        let mut builder = ReportBuilder::new();
        builder.push("19.21", &record("RU 19.21", &[("101", "crash on startup")]));
        assert_eq!(
            builder.lines(),
            &[
                "### RU 19.21\n".to_owned(),
                " *** RU 19.21\n".to_owned(),
                "     BUG 101 - crash on startup\n".to_owned(),
            ]
        );
    }

    #[test]
    fn bug_line_is_indented_display() {
        let bug = BugRecord::new("35643107", "ORA-600 IN KCBZPBUF");
        let line = render_bug(&bug);
        assert_eq!(line, "     BUG 35643107 - ORA-600 IN KCBZPBUF\n");
        assert_eq!(line, format!("{BUG_INDENT}{bug}\n"));
        assert!(line.starts_with(BUG_PREFIX));
    }

    #[test]
    fn duplicates_across_descriptors_keep_first_position() {
        let mut builder = ReportBuilder::new();
        builder.push("19.20", &record("first", &[("A", "a"), ("B", "b")]));
        builder.push("19.21", &record("second", &[("B", "b again"), ("C", "c")]));

        let report = builder.finish();
        assert_eq!(
            report.to_text(),
            "### RU 19.20\n *** first\n     BUG A - a\n     BUG B - b\n\
             ### RU 19.21\n *** second\n     BUG C - c\n"
        );
        assert_eq!(report.unique_bugs, 3);
        assert_eq!(report.descriptors_emitted, 2);
    }

    #[test]
    fn duplicates_within_one_descriptor_are_emitted_once() {
        let mut builder = ReportBuilder::new();
        builder.push("19.21", &record("RU", &[("A", "first"), ("A", "second")]));
        let report = builder.finish();
        assert_eq!(report.to_text(), "### RU 19.21\n *** RU\n     BUG A - first\n");
        assert_eq!(report.unique_bugs, 1);
    }

    #[test]
    fn empty_patch_description_is_skipped() {
        let mut builder = ReportBuilder::new();
        let emitted = builder.push("19.21", &record("", &[("A", "a")]));
        assert!(!emitted);
        assert!(builder.lines().is_empty());
        // 건너뛴 descriptor의 버그는 seen-set에 들어가지 않음
        builder.push("19.22", &record("RU", &[("A", "a")]));
        assert_eq!(builder.unique_bugs(), 1);
        assert!(builder.lines()[2].contains("BUG A"));
    }

    #[test]
    fn header_emitted_without_bugs() {
        let mut builder = ReportBuilder::new();
        let emitted = builder.push("19.21", &record("OJVM RU", &[]));
        assert!(emitted);
        assert_eq!(builder.lines().len(), 2);
    }

    #[test]
    fn header_emitted_even_when_all_bugs_are_duplicates() {
        let mut builder = ReportBuilder::new();
        builder.push("19.20", &record("first", &[("A", "a")]));
        builder.push("19.21", &record("second", &[("A", "a")]));
        let report = builder.finish();
        assert_eq!(report.descriptors_emitted, 2);
        assert_eq!(report.lines.len(), 5);
        assert_eq!(report.lines[3], "### RU 19.21\n");
    }

    #[test]
    fn sub_version_last_match_wins() {
        let mut builder = ReportBuilder::new();
        builder.push(
            "19.20",
            &record("Database Release Update : 19.20.0.0.230718 (35320081)", &[]),
        );
        builder.push("ojvm", &record("OJVM RELEASE UPDATE", &[]));
        builder.push(
            "19.21",
            &record("Database Release Update : 19.21.0.0.231017 (35643107)", &[]),
        );
        builder.push("misc", &record("no version here", &[]));
        assert_eq!(builder.latest_sub_version(), Some("19.21.0.0.231017"));
    }

    #[test]
    fn extract_sub_version_tolerates_spacing() {
        assert_eq!(
            extract_sub_version("Database Release Update:19.21"),
            Some("19.21")
        );
        assert_eq!(
            extract_sub_version("Database Release Update   :   19.3.0.0.190416"),
            Some("19.3.0.0.190416")
        );
        assert_eq!(extract_sub_version("GI Release Update 19.21"), None);
    }

    proptest! {
        #[test]
        fn each_bug_number_appears_at_most_once(
            descriptors in proptest::collection::vec(
                proptest::collection::vec(0u8..20, 0..10),
                0..8,
            )
        ) {
            let mut builder = ReportBuilder::new();
            for (i, numbers) in descriptors.iter().enumerate() {
                let bugs = numbers
                    .iter()
                    .map(|n| BugRecord::new(n.to_string(), "desc"))
                    .collect();
                builder.push(&i.to_string(), &PatchRecord {
                    patch_description: "RU".to_owned(),
                    bugs,
                });
            }
            let report = builder.finish();

            let mut seen = HashSet::new();
            for line in report.lines.iter().filter(|l| l.starts_with(BUG_PREFIX)) {
                prop_assert!(seen.insert(line.clone()), "duplicate line {}", line);
            }
            prop_assert_eq!(seen.len(), report.unique_bugs);
            prop_assert_eq!(report.descriptors_emitted, descriptors.len());
        }
    }
}
