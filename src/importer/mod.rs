// ==========================================
// 艺术品顾问系统 - 导入层
// ==========================================
// 职责: 表格(CSV/XLSX) + 图片压缩包 → 逐行规范化艺术品 → 落库回调
// 支持: Excel, CSV, ZIP(jpg/jpeg/png)
// ==========================================

// 模块声明
pub mod artwork_importer_trait;
pub mod bulk_importer;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod image_archive;
pub mod repository_sink;

// 重导出核心类型
pub use bulk_importer::BulkImporter;
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{
    compose_dimensions, normalize_header, FieldMapper as FieldMapperImpl, REQUIRED_COLUMNS,
};
pub use file_parser::{CsvParser, ExcelParser, RawRow, RawSheet, UniversalFileParser};
pub use image_archive::{load_image_archive, read_image_archive, ImageMap};
pub use repository_sink::{resolve_client_reference, RepositoryArtworkSink};

// 重导出 Trait 接口
pub use artwork_importer_trait::{ArtworkSink, FieldMapper, FileParser};
