// ==========================================
// 艺术品顾问系统 - 事实表（单件艺术品 PDF）
// ==========================================
// 流程: layout（绘制指令）→ pdf（字节）
// 约束: 图片缺失/损坏不报错，降级为占位框
// ==========================================

pub mod raster;
pub mod layout;
pub mod metrics;
pub mod pdf;

pub use layout::{
    layout_fact_sheet, metadata_rows, DrawOp, FactSheetDocument, FactSheetPage, FontFace,
    PLACEHOLDER_CAPTION,
};

use crate::config::FactSheetLayoutConfig;
use crate::domain::artwork::ArtworkRecord;
use crate::export::error::ExportResult;
use crate::export::format::{sanitize_file_component, ExportFile, MIME_PDF};
use tracing::debug;

/// 渲染单件艺术品的事实表
///
/// # 返回
/// - Ok(Vec<u8>): PDF 字节
pub fn render_fact_sheet(artwork: &ArtworkRecord, cfg: &FactSheetLayoutConfig) -> ExportResult<Vec<u8>> {
    let doc = layout_fact_sheet(artwork, cfg);
    debug!(
        artwork_id = ?artwork.id,
        pages = doc.page_count(),
        placeholder = doc.has_placeholder(),
        "事实表版式完成"
    );
    pdf::write_pdf(&doc)
}

/// 单份事实表文件名：`FactSheet_{artist}_{title}_{id}.pdf`
pub fn fact_sheet_file_name(artwork: &ArtworkRecord) -> String {
    format!(
        "FactSheet_{}_{}_{}.pdf",
        sanitize_file_component(&artwork.artist),
        sanitize_file_component(&artwork.title),
        artwork.id.as_deref().unwrap_or("x")
    )
}

/// 渲染单份事实表并命名
pub fn fact_sheet_file(artwork: &ArtworkRecord, cfg: &FactSheetLayoutConfig) -> ExportResult<ExportFile> {
    let bytes = render_fact_sheet(artwork, cfg)?;
    Ok(ExportFile::new(fact_sheet_file_name(artwork), MIME_PDF, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_sheet_file_name() {
        let mut art = ArtworkRecord {
            artist: "Jane Doe".to_string(),
            title: "Blue / Green".to_string(),
            ..Default::default()
        };
        assert_eq!(fact_sheet_file_name(&art), "FactSheet_Jane_Doe_Blue_Green_x.pdf");

        art.id = Some("abc-123".to_string());
        assert_eq!(fact_sheet_file_name(&art), "FactSheet_Jane_Doe_Blue_Green_abc-123.pdf");
    }

    #[test]
    fn test_fact_sheet_file_is_pdf() {
        let art = ArtworkRecord {
            artist: "Jane Doe".to_string(),
            title: "Untitled".to_string(),
            ..Default::default()
        };
        let file = fact_sheet_file(&art, &FactSheetLayoutConfig::default()).unwrap();
        assert_eq!(file.mime_type, MIME_PDF);
        assert!(file.bytes.starts_with(b"%PDF-"));
    }
}
