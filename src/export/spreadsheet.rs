// ==========================================
// 艺术品顾问系统 - 库存表导出（XLSX / CSV）
// ==========================================
// 列: ID, Artist, Title, Year, Medium, Dimensions, Condition, Price,
//     Location, Provenance, Exhibitions, Literature, Notes, ClientId, CreatedAt
// 空输入: 不产生文件（返回 None）
// ==========================================

use crate::domain::artwork::ArtworkRecord;
use crate::export::error::ExportResult;
use crate::export::format::{dated_file_name, ExportFile, MIME_CSV, MIME_XLSX};
use chrono::{NaiveDate, SecondsFormat};
use csv::{QuoteStyle, WriterBuilder};
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

pub const INVENTORY_SHEET_NAME: &str = "Artworks";

pub const INVENTORY_HEADERS: [&str; 15] = [
    "ID",
    "Artist",
    "Title",
    "Year",
    "Medium",
    "Dimensions",
    "Condition",
    "Price",
    "Location",
    "Provenance",
    "Exhibitions",
    "Literature",
    "Notes",
    "ClientId",
    "CreatedAt",
];

/// 单元格值（XLSX 区分数字与文本）
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    fn text(value: &Option<String>) -> Self {
        value.clone().map(CellValue::Text).unwrap_or(CellValue::Empty)
    }

    fn number(value: Option<f64>) -> Self {
        value.map(CellValue::Number).unwrap_or(CellValue::Empty)
    }

    /// CSV 文本形式
    pub fn to_csv_field(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

/// 扁平化为一行（与 INVENTORY_HEADERS 对齐）
pub fn inventory_row(artwork: &ArtworkRecord) -> Vec<CellValue> {
    vec![
        CellValue::text(&artwork.id),
        CellValue::Text(artwork.artist.clone()),
        CellValue::Text(artwork.title.clone()),
        CellValue::text(&artwork.year),
        CellValue::text(&artwork.medium),
        CellValue::text(&artwork.dimensions),
        CellValue::Text(artwork.condition.clone()),
        CellValue::number(artwork.price),
        CellValue::text(&artwork.location),
        CellValue::text(&artwork.provenance),
        CellValue::text(&artwork.exhibition),
        CellValue::text(&artwork.literature),
        CellValue::text(&artwork.notes),
        CellValue::text(&artwork.client_id),
        CellValue::text(
            &artwork
                .created_at
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ),
    ]
}

/// 导出 XLSX（单表 "Artworks"）
///
/// # 返回
/// - Ok(None): 输入为空
/// - Ok(Some(file)): `inventory_{YYYY-MM-DD}.xlsx`
pub fn export_inventory_xlsx(
    artworks: &[ArtworkRecord],
    today: NaiveDate,
) -> ExportResult<Option<ExportFile>> {
    if artworks.is_empty() {
        return Ok(None);
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(INVENTORY_SHEET_NAME)?;

    for (col, header) in INVENTORY_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, artwork) in artworks.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, cell) in inventory_row(artwork).into_iter().enumerate() {
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row, col as u16, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row, col as u16, n)?;
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    info!(rows = artworks.len(), "库存 XLSX 导出完成");
    Ok(Some(ExportFile::new(
        dated_file_name("inventory", today, "xlsx"),
        MIME_XLSX,
        bytes,
    )))
}

/// 导出 CSV（仅在必要时加引号：含逗号、引号或换行）
///
/// # 返回
/// - Ok(None): 输入为空
/// - Ok(Some(file)): `{name}_{YYYY-MM-DD}.csv`
pub fn export_inventory_csv(
    artworks: &[ArtworkRecord],
    name: &str,
    today: NaiveDate,
) -> ExportResult<Option<ExportFile>> {
    if artworks.is_empty() {
        return Ok(None);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(INVENTORY_HEADERS)?;
    for artwork in artworks {
        writer.write_record(inventory_row(artwork).iter().map(CellValue::to_csv_field))?;
    }
    let bytes = writer.into_inner()?;

    info!(rows = artworks.len(), "库存 CSV 导出完成");
    Ok(Some(ExportFile::new(
        dated_file_name(name, today, "csv"),
        MIME_CSV,
        bytes,
    )))
}
