//! 실행 오케스트레이터 -- 스캔, 파싱, 병합, 저장을 한 번에 수행
//!
//! # 내부 흐름
//!
//! ```text
//! scan_dir --> ArchiveScanner --> DescriptorParser --> ReportBuilder --> ReportWriter
//!                 (version order)     (per member)       (dedup)          (output file)
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::archive::{ArchiveScanner, DiscoveredDescriptor};
use crate::config::InventoryConfig;
use crate::descriptor::DescriptorParser;
use crate::error::InventoryError;
use crate::report::{Report, ReportBuilder};
use crate::writer::ReportWriter;

/// 실행 요약
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// 저장된 결과 파일 경로
    pub output_path: PathBuf,
    /// 헤더를 출력한 descriptor 수
    pub descriptors_emitted: usize,
    /// 출력한 고유 버그 수
    pub unique_bugs: usize,
    /// 열어 본 아카이브 수
    pub archives_scanned: usize,
    /// 손상되어 건너뛴 아카이브 수
    pub archives_skipped: usize,
    /// 기본 파일명에 쓰인 DB RU 버전
    pub latest_sub_version: Option<String>,
}

/// 스캐너 순서대로 descriptor를 파싱하여 하나의 리포트로 병합합니다.
///
/// 파싱에 실패한 descriptor는 빈 레코드로 취급되어 건너뜁니다.
pub fn merge_descriptors(descriptors: &[DiscoveredDescriptor]) -> Report {
    let parser = DescriptorParser;
    let mut builder = ReportBuilder::new();

    for descriptor in descriptors {
        let source = descriptor.source_name();
        let record = parser.parse_lossy(&descriptor.content, &source);
        if builder.push(&descriptor.display_name, &record) {
            info!(source = %source, bugs = record.bug_count(), "processed descriptor");
        }
    }

    builder.finish()
}

/// 설정된 디렉토리로 한 번 실행합니다.
///
/// - descriptor가 없으면 경고 후 `Ok(None)` (결과 파일을 만들지 않음)
/// - 결과 파일 저장 실패는 `Err(InventoryError::Io)`
pub fn run(
    config: InventoryConfig,
    output: Option<&Path>,
) -> Result<Option<RunSummary>, InventoryError> {
    let scanner = ArchiveScanner::new(config)?;
    let scan_dir = &scanner.config().scan_dir;

    let outcome = scanner.scan(scan_dir);
    if outcome.descriptors.is_empty() {
        warn!(
            dir = %scan_dir.display(),
            descriptor = %scanner.config().descriptor_name,
            "no archives containing descriptor found"
        );
        return Ok(None);
    }

    let report = merge_descriptors(&outcome.descriptors);

    let output_path = ReportWriter.write(&report, output)?;

    info!(
        path = %output_path.display(),
        descriptors = report.descriptors_emitted,
        unique_bugs = report.unique_bugs,
        archives_skipped = outcome.archives_skipped,
        "run complete"
    );

    Ok(Some(RunSummary {
        output_path,
        descriptors_emitted: report.descriptors_emitted,
        unique_bugs: report.unique_bugs,
        archives_scanned: outcome.archives_scanned,
        archives_skipped: outcome.archives_skipped,
        latest_sub_version: report.latest_sub_version,
    }))
}
