// ==========================================
// 艺术品顾问系统 - 批量导入器实现
// ==========================================
// 流程: 解析表格 → 必填列校验 → 图片包预解压 → 逐行(规范化 → 映射 → 挂图 → 落库回调)
// 错误: 前置条件失败整体返回 Err；行级失败记录后继续
// ==========================================

use crate::domain::import::BulkImportOutcome;
use crate::importer::artwork_importer_trait::{ArtworkSink, FieldMapper, FileParser};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{
    normalize_header, normalize_row, FieldMapper as FieldMapperImpl, REQUIRED_COLUMNS,
};
use crate::importer::file_parser::{RawSheet, UniversalFileParser};
use crate::importer::image_archive::{load_image_archive, ImageMap};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// 规范化列名下的图片文件名列
const PRIMARY_IMAGE_COLUMN: &str = "primary_image_filename";

// ==========================================
// BulkImporter - 批量导入器
// ==========================================
pub struct BulkImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl Default for BulkImporter {
    fn default() -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl::default()),
        )
    }
}

impl BulkImporter {
    /// 创建新的 BulkImporter 实例
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    pub fn new(file_parser: Box<dyn FileParser>, field_mapper: Box<dyn FieldMapper>) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }

    /// 执行批量导入
    ///
    /// # 参数
    /// - sheet: 表格文件（必填）
    /// - images: 图片压缩包（可选）
    /// - sink: 逐行落库回调
    ///
    /// # 返回
    /// - Ok(BulkImportOutcome): created + 行级错误（每行恰好计入一次）
    /// - Err: 缺少表格、解析失败、缺少必填列
    #[instrument(skip_all, fields(sheet = ?sheet.map(Path::display), has_images = images.is_some()))]
    pub async fn import(
        &self,
        sheet: Option<&Path>,
        images: Option<&Path>,
        sink: &dyn ArtworkSink,
    ) -> ImportResult<BulkImportOutcome> {
        // === 步骤 1: 表格必填 ===
        let sheet_path = sheet.ok_or(ImportError::SpreadsheetMissing)?;

        // === 步骤 2: 解析首个工作表 ===
        let raw_sheet = self.file_parser.parse_sheet(sheet_path)?;
        info!(rows = raw_sheet.rows.len(), "表格解析完成");

        // === 步骤 3: 必填列校验（任何行处理之前）===
        check_required_columns(&raw_sheet)?;

        // === 步骤 4: 图片包预解压（一次）===
        let image_map = match images {
            Some(path) => load_image_archive(path)?,
            None => ImageMap::new(),
        };
        debug!(images = image_map.len(), "图片映射就绪");

        // === 步骤 5: 逐行处理 ===
        let mut outcome = BulkImportOutcome::default();
        for raw_row in raw_sheet.rows {
            let row_number = raw_row.row_number;
            let row = normalize_row(&raw_row.cells);

            let mut artwork = match self.field_mapper.map_row(&row, row_number) {
                Ok(artwork) => artwork,
                Err(e) => {
                    warn!(row = row_number, error = %e, "字段映射失败");
                    outcome.record_failure(row_number, e.to_string());
                    continue;
                }
            };

            let image_name = row
                .get(PRIMARY_IMAGE_COLUMN)
                .map(|v| v.trim())
                .unwrap_or_default();
            if !image_name.is_empty() {
                artwork.image_data = image_map.get(image_name).cloned();
                if artwork.image_data.is_none() {
                    debug!(row = row_number, file = image_name, "压缩包中无对应图片");
                }
            }

            match sink.persist(artwork).await {
                Ok(()) => outcome.record_success(),
                Err(e) => {
                    warn!(row = row_number, error = %e, "行落库失败");
                    outcome.record_failure(row_number, e.to_string());
                }
            }
        }

        info!(
            created = outcome.created,
            failed = outcome.errors.len(),
            "批量导入完成"
        );
        Ok(outcome)
    }
}

/// 校验必填列（按规范化列名）
///
/// 只看表头：表头齐全但没有数据行时视为空导入（created = 0）
fn check_required_columns(sheet: &RawSheet) -> ImportResult<()> {
    let present: HashSet<String> = sheet.headers.iter().map(|h| normalize_header(h)).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(**col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns(missing))
    }
}
