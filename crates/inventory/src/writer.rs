//! 결과 파일 저장
//!
//! 출력 파일명이 지정되지 않으면 마지막 DB RU 버전과 오늘 날짜로
//! `Fixed_Bug_For_<버전>_<YYYYMMDD>.txt`를 만듭니다.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::InventoryError;
use crate::report::Report;

/// 기본 파일명 접두사
const FILE_PREFIX: &str = "Fixed_Bug";

/// 기본 출력 파일명을 생성합니다.
///
/// - 버전 있음: `Fixed_Bug_For_19.21.0.0.231017_20231020.txt`
/// - 버전 없음: `Fixed_Bug_20231020.txt`
pub fn default_file_name(sub_version: Option<&str>, date: NaiveDate) -> String {
    let stamp = date.format("%Y%m%d");
    match sub_version {
        Some(version) => format!("{FILE_PREFIX}_For_{version}_{stamp}.txt"),
        None => format!("{FILE_PREFIX}_{stamp}.txt"),
    }
}

/// 리포트 파일 작성기
pub struct ReportWriter;

impl ReportWriter {
    /// 리포트를 파일로 저장하고 실제 경로를 반환합니다.
    ///
    /// `output`이 `None`이면 [`default_file_name`]과 로컬 현재 날짜로 현재 디렉토리에 저장합니다.
    ///
    /// # Errors
    ///
    /// 파일 생성/쓰기/flush 실패 시 `InventoryError::Io`. 부분적으로 쓰인 파일은 정리하지 않습니다.
    pub fn write(&self, report: &Report, output: Option<&Path>) -> Result<PathBuf, InventoryError> {
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(default_file_name(
                report.latest_sub_version.as_deref(),
                chrono::Local::now().date_naive(),
            )),
        };

        self.write_to(report, &path)?;
        info!(path = %path.display(), lines = report.lines.len(), "report saved");
        Ok(path)
    }

    /// 지정한 경로에 리포트를 저장합니다.
    pub fn write_to(&self, report: &Report, path: &Path) -> Result<(), InventoryError> {
        let io_err = |source: std::io::Error| InventoryError::Io {
            path: path.display().to_string(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        for line in &report.lines {
            out.write_all(line.as_bytes()).map_err(io_err)?;
        }
        out.flush().map_err(io_err)?;
        Ok(())
    }
}
