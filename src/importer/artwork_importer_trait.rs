// ==========================================
// 艺术品顾问系统 - 批量导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::artwork::BulkArtwork;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawSheet;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 读取表格首个工作表（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行记录
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头（原样）与数据行（含表格行号）
    /// - Err: 文件读取错误、格式错误
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 规范化行 → BulkArtwork（阶段 1）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 映射一行（键已规范化为小写下划线）
    ///
    /// # 参数
    /// - row: 规范化后的行
    /// - row_number: 表格行号
    ///
    /// # 返回
    /// - Ok(BulkArtwork): 映射结果（client_id 未解析）
    /// - Err: 数值列无法解析等行级错误
    fn map_row(&self, row: &HashMap<String, String>, row_number: usize)
        -> ImportResult<BulkArtwork>;
}

// ==========================================
// ArtworkSink Trait
// ==========================================
// 用途: 调用方提供的逐行落库回调（解析客户 + 创建艺术品）
// 实现者: RepositoryArtworkSink；测试中用记录调用的桩实现
// 约束: 失败通过 Err 表达，成功返回 Ok(())
#[async_trait]
pub trait ArtworkSink: Send + Sync {
    async fn persist(&self, artwork: BulkArtwork) -> anyhow::Result<()>;
}

