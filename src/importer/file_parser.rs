// ==========================================
// 艺术品顾问系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)，只读取首个工作表
// ==========================================

use crate::importer::artwork_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// RawSheet - 解析结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    /// 表头（去除首尾空白，未规范化）
    pub headers: Vec<String>,
    /// 数据行（已跳过全空行）
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
pub struct RawRow {
    /// 表格行号（1 起，表头为第 1 行）
    pub row_number: usize,
    /// 列名 → 单元格值；缺失单元格为空串
    pub cells: HashMap<String, String>,
}

/// 按表头组装一行；全空行返回 None
fn build_row<I>(headers: &[String], values: I, row_number: usize) -> Option<RawRow>
where
    I: Iterator<Item = String>,
{
    let mut cells: HashMap<String, String> = headers
        .iter()
        .filter(|h| !h.is_empty())
        .map(|h| (h.clone(), String::new()))
        .collect();

    for (col_idx, value) in values.enumerate() {
        if let Some(header) = headers.get(col_idx) {
            if !header.is_empty() {
                cells.insert(header.clone(), value.trim().to_string());
            }
        }
    }

    // 跳过完全空白的行
    if cells.values().all(|v| v.is_empty()) {
        return None;
    }

    Some(RawRow { row_number, cells })
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 表头占第 1 行
            let row_number = idx + 2;
            if let Some(row) = build_row(&headers, record.iter().map(str::to_string), row_number) {
                rows.push(row);
            }
        }

        Ok(RawSheet { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 空工作表：无表头、无数据
        let Some((first_row, _)) = range.start() else {
            return Ok(RawSheet::default());
        };

        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
            None => return Ok(RawSheet::default()),
        };

        // calamine 行号 0 起；表头所在行号 = first_row + 1
        let header_row_number = first_row as usize + 1;
        let mut rows = Vec::new();
        for (idx, data_row) in rows_iter.enumerate() {
            let row_number = header_row_number + idx + 1;
            let values = data_row.iter().map(|cell| cell.to_string());
            if let Some(row) = build_row(&headers, values, row_number) {
                rows.push(row);
            }
        }

        Ok(RawSheet { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_sheet(file_path),
            "xlsx" | "xls" => ExcelParser.parse_sheet(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
