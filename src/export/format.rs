// ==========================================
// 艺术品顾问系统 - 导出格式化工具
// ==========================================
// 职责: 文件名清洗、金额格式化、带日期文件名、导出文件载体
// 约束: 纯函数，无隐藏状态
// ==========================================

use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_ZIP: &str = "application/zip";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_CSV: &str = "text/csv";

/// 一个待交付的导出文件（文件名 + 字节）
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn new(file_name: impl Into<String>, mime_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
        }
    }

    /// 写入目标目录（目录不存在时创建）
    ///
    /// # 返回
    /// - Ok(PathBuf): 写出的完整路径
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// 文件名片段清洗：`[A-Za-z0-9._-]` 之外的连续字符替换为单个 `_`
pub fn sanitize_file_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// 金额格式化：`$` + 千分位，最多 3 位小数且去掉末尾 0
///
/// # 示例
/// - 1500.0 → "$1,500"
/// - 1234.5 → "$1,234.5"
pub fn format_money(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "$∞" } else { "$-∞" }.to_string();
    }

    let scaled = (value.abs() * 1000.0).round();
    let integer = (scaled / 1000.0).trunc() as u64;
    let fraction = (scaled % 1000.0) as u64;

    let mut out = String::from("$");
    if value < 0.0 && scaled > 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if fraction > 0 {
        let digits = format!("{:03}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `{stem}_{YYYY-MM-DD}.{ext}`
pub fn dated_file_name(stem: &str, today: NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", stem, today.format("%Y-%m-%d"), extension)
}
