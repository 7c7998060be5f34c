use crate::domain::artwork::DEFAULT_CONDITION;
use crate::domain::client::ClientType;
use serde::{Deserialize, Serialize};

/// 事实表版式参数（单位 pt，坐标原点在页面左上角）
///
/// 存储位置：config_kv（key='fact_sheet/*'），缺省为 Letter 纸
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSheetLayoutConfig {
    pub page_width: f32,
    pub page_height: f32,

    /// 四边页边距
    pub margin: f32,

    /// 图片最大高度
    pub image_max_height: f32,

    /// 无图占位框高度
    pub placeholder_height: f32,

    /// 换页阈值：当前 y 超过该值时，正文行与元数据表都先换页
    pub low_water_mark: f32,
}

impl FactSheetLayoutConfig {
    /// 内容区宽度
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin * 2.0
    }
}

impl Default for FactSheetLayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 54.0,
            image_max_height: 300.0,
            placeholder_height: 260.0,
            low_water_mark: 740.0,
        }
    }
}

/// 批量导入缺省值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDefaults {
    /// 行中无 condition 时的取值
    pub condition: String,

    /// 按邮箱新建客户时的类型
    pub client_type: ClientType,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            condition: DEFAULT_CONDITION.to_string(),
            client_type: ClientType::Collector,
        }
    }
}
