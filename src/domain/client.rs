// ==========================================
// 艺术品顾问系统 - 客户领域模型
// ==========================================
// 职责: 客户记录、新建客户参数、客户类型
// 约束: email 是批量导入匹配用的自然键
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// ClientType - 客户类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientType {
    Collector,
    Institution,
    Dealer,
    Other(String),
}

impl Default for ClientType {
    fn default() -> Self {
        ClientType::Collector
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientType::Collector => write!(f, "Collector"),
            ClientType::Institution => write!(f, "Institution"),
            ClientType::Dealer => write!(f, "Dealer"),
            ClientType::Other(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for ClientType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "Collector" => ClientType::Collector,
            "Institution" => ClientType::Institution,
            "Dealer" => ClientType::Dealer,
            other => ClientType::Other(other.to_string()),
        })
    }
}

// ==========================================
// ClientRecord - 客户记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub client_type: ClientType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientRecord {
    /// 导出归档用的标签：名称 → 邮箱本地部分 → "Client"
    pub fn archive_label(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        let local = email_local_part(&self.email);
        if local.is_empty() {
            "Client".to_string()
        } else {
            local.to_string()
        }
    }
}

// ==========================================
// NewClient - 新建客户参数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub client_type: ClientType,
}

impl NewClient {
    /// 仅凭邮箱创建最小客户（名称取 @ 之前部分）
    pub fn minimal_from_email(email: &str, client_type: ClientType) -> Self {
        Self {
            name: email_local_part(email).to_string(),
            email: email.to_string(),
            client_type,
            ..Default::default()
        }
    }
}

/// 邮箱 @ 之前的部分（无 @ 时为整串）
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or("")
}
