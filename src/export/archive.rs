// ==========================================
// 艺术品顾问系统 - 事实表批量打包
// ==========================================
// 结构: {label}/FactSheets/FactSheet_{label}_{artist}_{title}_{id|x}.pdf
// 空输入: 不产生文件（返回 None）
// ==========================================

use crate::config::FactSheetLayoutConfig;
use crate::domain::artwork::ArtworkRecord;
use crate::export::error::ExportResult;
use crate::export::fact_sheet::render_fact_sheet;
use crate::export::format::{dated_file_name, sanitize_file_component, ExportFile, MIME_ZIP};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use tracing::{info, instrument, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 标签为空时使用的目录名
pub const FALLBACK_ARCHIVE_LABEL: &str = "Client";

/// 压缩包内条目路径
pub fn archive_entry_name(label: &str, artwork: &ArtworkRecord) -> String {
    let label = match sanitize_file_component(label.trim()) {
        l if l.is_empty() || l == "_" => FALLBACK_ARCHIVE_LABEL.to_string(),
        l => l,
    };
    format!(
        "{}/FactSheets/FactSheet_{}_{}_{}_{}.pdf",
        label,
        label,
        sanitize_file_component(&artwork.artist),
        sanitize_file_component(&artwork.title),
        artwork.id.as_deref().unwrap_or("x")
    )
}

/// 同名条目追加序号（`_2`、`_3` …）
fn unique_entry_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let stem = name.trim_end_matches(".pdf");
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}.pdf", stem, n);
        if used.insert(candidate.clone()) {
            warn!(entry = %name, renamed = %candidate, "压缩包条目重名，追加序号");
            return candidate;
        }
        n += 1;
    }
}

/// 按输入顺序渲染全部事实表并打包
///
/// # 参数
/// - artworks: 已加载的艺术品
/// - label: 目录与文件名前缀（通常为客户名）
/// - today: 压缩包文件名日期
#[instrument(skip(artworks, cfg), fields(count = artworks.len()))]
pub fn render_fact_sheets_archive(
    artworks: &[ArtworkRecord],
    label: &str,
    today: NaiveDate,
    cfg: &FactSheetLayoutConfig,
) -> ExportResult<Option<ExportFile>> {
    if artworks.is_empty() {
        return Ok(None);
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);
    let mut used = HashSet::new();

    for artwork in artworks {
        let pdf = render_fact_sheet(artwork, cfg)?;
        let entry = unique_entry_name(archive_entry_name(label, artwork), &mut used);
        zip.start_file(entry, options)?;
        zip.write_all(&pdf)?;
    }

    let bytes = zip.finish()?.into_inner();
    info!(entries = used.len(), size = bytes.len(), "事实表压缩包生成完成");

    Ok(Some(ExportFile::new(
        dated_file_name("FactSheets", today, "zip"),
        MIME_ZIP,
        bytes,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn art(artist: &str, title: &str, id: Option<&str>) -> ArtworkRecord {
        ArtworkRecord {
            artist: artist.to_string(),
            title: title.to_string(),
            id: id.map(str::to_string),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_empty_input_produces_nothing() {
        let result = render_fact_sheets_archive(&[], "Client", today(), &FactSheetLayoutConfig::default());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_archive_entry_name() {
        let name = archive_entry_name("Jane Doe", &art("A. Artist", "Sky #2", Some("id1")));
        assert_eq!(name, "Jane_Doe/FactSheets/FactSheet_Jane_Doe_A._Artist_Sky_2_id1.pdf");
        let name = archive_entry_name("Client", &art("A", "T", None));
        assert_eq!(name, "Client/FactSheets/FactSheet_Client_A_T_x.pdf");
    }

    #[test]
    fn test_blank_label_falls_back() {
        for label in ["", "   ", "!!!"] {
            let name = archive_entry_name(label, &art("A", "T", Some("7")));
            assert_eq!(name, "Client/FactSheets/FactSheet_Client_A_T_7.pdf");
        }
    }

    #[test]
    fn test_archive_entries_in_order_and_unique() {
        let artworks = vec![
            art("Same", "Same", Some("1")),
            art("Same", "Same", Some("2")),
            art("Same", "Same", None),
            art("Same", "Same", None),
        ];
        let file = render_fact_sheets_archive(&artworks, "My Client", today(), &FactSheetLayoutConfig::default())
            .unwrap()
            .unwrap();

        assert_eq!(file.file_name, "FactSheets_2024-05-01.zip");
        let mut archive = ZipArchive::new(Cursor::new(file.bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "My_Client/FactSheets/FactSheet_My_Client_Same_Same_1.pdf",
                "My_Client/FactSheets/FactSheet_My_Client_Same_Same_2.pdf",
                "My_Client/FactSheets/FactSheet_My_Client_Same_Same_x.pdf",
                "My_Client/FactSheets/FactSheet_My_Client_Same_Same_x_2.pdf",
            ]
        );

        let mut first = Vec::new();
        archive.by_index(0).unwrap().read_to_end(&mut first).unwrap();
        assert!(first.starts_with(b"%PDF-"));
    }
}
