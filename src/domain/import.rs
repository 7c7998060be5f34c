// ==========================================
// 艺术品顾问系统 - 批量导入结果模型
// ==========================================
// 约束: 每一行恰好产生一个结果：created +1 或 errors 追加一条
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RowError - 行级错误
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize, // 表格行号（首个数据行为 2）
    pub error: String,
}

// ==========================================
// BulkImportOutcome - 批量导入结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportOutcome {
    pub created: usize,
    pub errors: Vec<RowError>,
}

impl BulkImportOutcome {
    /// 已处理的行数
    pub fn total_rows(&self) -> usize {
        self.created + self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn record_success(&mut self) {
        self.created += 1;
    }

    pub(crate) fn record_failure(&mut self, row: usize, error: impl Into<String>) {
        self.errors.push(RowError {
            row,
            error: error.into(),
        });
    }
}
