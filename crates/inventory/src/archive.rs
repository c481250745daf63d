//! 아카이브 스캐너 -- 디렉토리의 ZIP 파일에서 inventory.xml 수집
//!
//! [`ArchiveScanner`]는 스캔 디렉토리의 직계 아카이브를 버전 순으로 정렬한 뒤,
//! 각 아카이브에서 이름이 descriptor 파일명으로 끝나는 멤버를 모두 읽습니다.
//!
//! 손상된 아카이브는 경고를 남기고 건너뛰며 스캔 전체를 중단하지 않습니다.
//! 각 아카이브는 다음 아카이브를 열기 전에 닫힙니다.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::version::{version_key, version_token};

/// 아카이브에서 발견한 descriptor 하나
#[derive(Debug, Clone)]
pub struct DiscoveredDescriptor {
    /// 아카이브 경로
    pub archive_path: PathBuf,
    /// 아카이브 내 멤버 이름
    pub member_name: String,
    /// descriptor 원본 바이트
    pub content: Vec<u8>,
    /// 헤더에 표시할 이름 (확장자와 버전 표식 앞부분 제거)
    pub display_name: String,
}

impl DiscoveredDescriptor {
    /// 진단 메시지용 위치 문자열 (`archive.zip/member`)
    pub fn source_name(&self) -> String {
        format!("{}/{}", self.archive_path.display(), self.member_name)
    }
}

/// 스캔 결과
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// 발견한 descriptor (아카이브 정렬 순서, 아카이브 내 멤버 순서)
    pub descriptors: Vec<DiscoveredDescriptor>,
    /// 열어 본 아카이브 수 (손상 포함)
    pub archives_scanned: usize,
    /// 손상/읽기 실패로 건너뛴 아카이브 수
    pub archives_skipped: usize,
}

/// 아카이브 스캐너
pub struct ArchiveScanner {
    config: InventoryConfig,
}

impl ArchiveScanner {
    /// 검증된 설정으로 스캐너를 생성합니다.
    pub fn new(config: InventoryConfig) -> Result<Self, InventoryError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 스캐너 설정을 반환합니다.
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// 디렉토리의 아카이브 파일을 버전 순으로 반환합니다.
    ///
    /// 디렉토리가 없거나 읽을 수 없으면 경고 후 빈 목록을 반환합니다.
    /// 경로 순으로 먼저 정렬한 뒤 버전 키로 안정 정렬하므로 결과가 결정적입니다.
    pub fn list_archives(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot read scan directory");
                return Vec::new();
            }
        };

        let mut archives: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(e) => Some(e.path()),
                Err(e) => {
                    warn!(error = %e, "failed to read directory entry");
                    None
                }
            })
            .filter(|path| path.is_file() && self.is_archive(path))
            .collect();

        archives.sort();
        archives.sort_by_cached_key(|path| version_key(path, &self.config.version_marker));
        archives
    }

    /// 디렉토리를 스캔하여 모든 descriptor를 수집합니다.
    pub fn scan(&self, dir: &Path) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for archive in self.list_archives(dir) {
            outcome.archives_scanned += 1;
            match self.read_descriptors(&archive) {
                Ok(found) => {
                    if found.is_empty() {
                        debug!(archive = %archive.display(), "no descriptor in archive");
                    }
                    outcome.descriptors.extend(found);
                }
                Err(e) => {
                    warn!(archive = %archive.display(), error = %e, "skipping unreadable archive");
                    outcome.archives_skipped += 1;
                }
            }
        }

        outcome
    }

    /// 아카이브 하나에서 descriptor 멤버를 모두 읽습니다.
    ///
    /// # Errors
    ///
    /// 아카이브를 열 수 없거나 유효한 ZIP이 아니면 `InventoryError::Archive`.
    /// 개별 멤버의 크기 초과 / 읽기 실패는 경고 후 해당 멤버만 건너뜁니다.
    pub fn read_descriptors(
        &self,
        archive_path: &Path,
    ) -> Result<Vec<DiscoveredDescriptor>, InventoryError> {
        let archive_err = |reason: String| InventoryError::Archive {
            path: archive_path.display().to_string(),
            reason,
        };

        let file = File::open(archive_path).map_err(|e| archive_err(e.to_string()))?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| archive_err(e.to_string()))?;

        let display_name = version_token(archive_path, &self.config.version_marker);
        let mut found = Vec::new();

        for index in 0..zip.len() {
            let mut member = match zip.by_index(index) {
                Ok(m) => m,
                Err(e) => {
                    warn!(archive = %archive_path.display(), index, error = %e, "failed to open archive member");
                    continue;
                }
            };

            let member_name = member.name().to_owned();
            if member.is_dir() || !member_name.ends_with(&self.config.descriptor_name) {
                continue;
            }

            let size = member.size();
            if usize::try_from(size).unwrap_or(usize::MAX) > self.config.max_descriptor_size {
                let err = InventoryError::DescriptorTooLarge {
                    source_name: format!("{}/{}", archive_path.display(), member_name),
                    size,
                    max: self.config.max_descriptor_size,
                };
                warn!(error = %err, "skipping descriptor");
                continue;
            }

            let mut content = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
            if let Err(e) = member.read_to_end(&mut content) {
                warn!(
                    archive = %archive_path.display(),
                    member = %member_name,
                    error = %e,
                    "failed to read descriptor"
                );
                continue;
            }

            info!(
                archive = %archive_path.display(),
                member = %member_name,
                "found descriptor"
            );

            found.push(DiscoveredDescriptor {
                archive_path: archive_path.to_path_buf(),
                member_name,
                content,
                display_name: display_name.clone(),
            });
        }

        Ok(found)
    }

    fn is_archive(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.config.archive_extension)
    }
}
