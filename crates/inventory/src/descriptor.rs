//! inventory.xml 파서
//!
//! [`DescriptorParser`]는 Oracle 패치의 `inventory.xml`을 파싱하여
//! [`PatchRecord`]를 생성합니다.
//!
//! # inventory.xml 형식 예시
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <inventory>
//!   <patch_description>Database Release Update : 19.21.0.0.231017 (35643107)</patch_description>
//!   <bugs_fixed>
//!     <bug number="29213893" description="DBMS_STATS FAILING WITH ERROR ORA-01422"/>
//!     <bug number="30978304" description="ORA-20001 DURING GATHER_TABLE_STATS"/>
//!   </bugs_fixed>
//! </inventory>
//! ```
//!
//! `patch_description`은 루트의 직계 자식만, `bug`는 트리 전체에서 찾습니다.
//!
//! # 인코딩
//!
//! BOM이 있으면 BOM을, 없으면 XML 선언의 `encoding`을 따르고, 둘 다 없으면 UTF-8로 읽습니다.

use std::borrow::Cow;

use encoding_rs::Encoding;
use fixbug_core::types::{BugRecord, PatchRecord};
use tracing::{debug, error, warn};

use crate::error::InventoryError;

/// 패치 설명 요소 이름
const PATCH_DESCRIPTION_TAG: &str = "patch_description";
/// 버그 항목 요소 이름
const BUG_TAG: &str = "bug";
/// 버그 번호 속성
const NUMBER_ATTR: &str = "number";
/// 버그 설명 속성
const DESCRIPTION_ATTR: &str = "description";

/// inventory.xml 파서
pub struct DescriptorParser;

impl DescriptorParser {
    /// descriptor 내용을 파싱하여 패치 레코드를 반환합니다.
    ///
    /// # Arguments
    ///
    /// - `content`: descriptor 원본 바이트 (BOM / XML 선언의 인코딩)
    /// - `source_name`: 진단 메시지용 위치 (`archive.zip/inventory.xml`)
    ///
    /// # Errors
    ///
    /// 선언된 인코딩으로 디코딩할 수 없거나 XML이 well-formed가 아니면 `InventoryError::DescriptorParse`
    pub fn parse(&self, content: &[u8], source_name: &str) -> Result<PatchRecord, InventoryError> {
        let text = decode(content).map_err(|reason| InventoryError::DescriptorParse {
            source_name: source_name.to_owned(),
            reason,
        })?;

        let mut options = roxmltree::ParsingOptions::default();
        options.allow_dtd = true;

        let doc = roxmltree::Document::parse_with_options(&text, options).map_err(|e| {
            InventoryError::DescriptorParse {
                source_name: source_name.to_owned(),
                reason: e.to_string(),
            }
        })?;
        let root = doc.root_element();

        let patch_description = root
            .children()
            .find(|n| n.has_tag_name(PATCH_DESCRIPTION_TAG))
            .map(leading_text)
            .unwrap_or_default();

        // 루트 자신은 제외 (descendants()는 자기 자신부터 시작)
        let bug_nodes: Vec<_> = root
            .descendants()
            .skip(1)
            .filter(|n| n.has_tag_name(BUG_TAG))
            .collect();

        if bug_nodes.is_empty() {
            warn!(source = %source_name, "no bug elements found in descriptor");
            return Ok(PatchRecord {
                patch_description,
                bugs: Vec::new(),
            });
        }

        let bugs = bug_nodes
            .iter()
            .filter_map(|node| {
                // number 없는 항목은 건너뜀
                let number = node.attribute(NUMBER_ATTR).filter(|n| !n.is_empty())?;
                let description = node.attribute(DESCRIPTION_ATTR).unwrap_or_default();
                Some(BugRecord::new(number, description))
            })
            .collect();

        Ok(PatchRecord {
            patch_description,
            bugs,
        })
    }

    /// [`parse`](Self::parse)와 같지만 실패 시 에러를 기록하고 빈 레코드를 반환합니다.
    pub fn parse_lossy(&self, content: &[u8], source_name: &str) -> PatchRecord {
        match self.parse(content, source_name) {
            Ok(record) => record,
            Err(e) => {
                error!(source = %source_name, error = %e, "failed to parse descriptor, treating as empty");
                PatchRecord::default()
            }
        }
    }
}

/// 첫 자식 요소 앞의 텍스트를 이어 붙입니다 (주석과 처리 명령은 건너뜀).
fn leading_text(node: roxmltree::Node<'_, '_>) -> String {
    node.children()
        .take_while(|c| !c.is_element())
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

/// descriptor 바이트를 문자열로 디코딩합니다.
fn decode(content: &[u8]) -> Result<Cow<'_, str>, String> {
    let (encoding, body) = match Encoding::for_bom(content) {
        Some((encoding, bom_len)) => (encoding, &content[bom_len..]),
        None => (sniff_encoding(content)?, content),
    };

    let text = decode_with(encoding, body)?;
    if encoding == encoding_rs::UTF_8 {
        return Ok(text);
    }

    debug!(encoding = encoding.name(), "decoding descriptor with non-utf-8 encoding");
    // 디코딩 후에는 원래 encoding 선언이 맞지 않으므로 제거
    Ok(match text {
        Cow::Borrowed(t) => Cow::Borrowed(strip_declaration(t)),
        Cow::Owned(t) => Cow::Owned(strip_declaration(&t).to_owned()),
    })
}

/// BOM이 없을 때 XML 선언에서 인코딩을 결정합니다.
fn sniff_encoding(content: &[u8]) -> Result<&'static Encoding, String> {
    let Some(label) = declared_encoding(content) else {
        return Ok(encoding_rs::UTF_8);
    };
    let encoding = Encoding::for_label(label)
        .ok_or_else(|| format!("unsupported encoding: {}", String::from_utf8_lossy(label)))?;

    // BOM 없이 ASCII로 쓰인 선언이면 UTF-16 표기는 무시
    if encoding.is_ascii_compatible() {
        Ok(encoding)
    } else {
        Ok(encoding_rs::UTF_8)
    }
}

fn decode_with<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Result<Cow<'a, str>, String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| format!("invalid {} byte sequence", encoding.name()))
}

/// `<?xml ... encoding="..." ?>` 선언에서 인코딩 라벨을 꺼냅니다.
fn declared_encoding(content: &[u8]) -> Option<&[u8]> {
    let decl = xml_declaration(content)?;
    let pos = decl.windows(8).position(|w| w == b"encoding")?;
    let rest = decl[pos + 8..].trim_ascii_start();
    let rest = rest.strip_prefix(b"=")?.trim_ascii_start();
    let (&quote, rest) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = rest.iter().position(|&b| b == quote)?;
    Some(&rest[..end])
}

fn xml_declaration(content: &[u8]) -> Option<&[u8]> {
    if !content.starts_with(b"<?xml") {
        return None;
    }
    let end = content.windows(2).position(|w| w == b"?>")?;
    Some(&content[..end])
}

fn strip_declaration(text: &str) -> &str {
    match text.strip_prefix("<?xml").and_then(|_| text.find("?>")) {
        Some(end) => &text[end + 2..],
        None => text,
    }
}
