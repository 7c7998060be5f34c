// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、导入夹具（CSV / XLSX / 图片压缩包）
// ==========================================

#![allow(dead_code)]

use art_advisory::app::AppState;
use image::{ImageFormat, Rgb, RgbImage};
use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use tempfile::{Builder, NamedTempFile, TempDir};
use zip::write::FileOptions;
use zip::ZipWriter;

/// 创建临时测试数据库并组装 AppState
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - AppState: 已建表的应用状态
pub fn create_test_state() -> Result<(NamedTempFile, AppState), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();
    let state = AppState::new(db_path)?;
    Ok((temp_file, state))
}

/// 写入 CSV 夹具
pub fn write_csv(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = Builder::new().suffix(".csv").tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// 写入 XLSX 夹具（首个工作表，全部按文本写入）
pub fn write_xlsx(headers: &[&str], rows: &[&[&str]]) -> Result<NamedTempFile, Box<dyn Error>> {
    let file = Builder::new().suffix(".xlsx").tempfile()?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (r, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string((r + 1) as u32, col as u16, *value)?;
            }
        }
    }
    workbook.save(file.path())?;

    Ok(file)
}

/// 生成纯色 PNG
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// 写入图片压缩包夹具
pub fn write_image_zip(entries: &[(&str, Vec<u8>)]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = Builder::new().suffix(".zip").tempfile()?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::<()>::default();
    for (name, data) in entries {
        zip.start_file(name.to_string(), options)?;
        zip.write_all(data)?;
    }
    let bytes = zip.finish()?.into_inner();
    file.write_all(&bytes)?;
    file.flush()?;

    Ok(file)
}

/// 导出文件输出目录
pub fn output_dir() -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().to_path_buf();
    Ok((dir, path))
}
