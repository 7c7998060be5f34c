// ==========================================
// 艺术品顾问系统 - 事实表版式
// ==========================================
// 职责: ArtworkRecord → 分页绘制指令列表（不涉及 PDF 语法）
// 流程: 图片/占位框 → 标题区 → 叙述段落 → 元数据表
// 坐标: 原点在页面左上角，y 向下；文字 y 为基线
// ==========================================

use super::raster::{fit_image, prepare_image, PreparedImage};
use super::metrics::{text_width, wrap_text};
use crate::config::FactSheetLayoutConfig;
use crate::domain::artwork::ArtworkRecord;
use crate::export::format::format_money;

pub const PLACEHOLDER_CAPTION: &str = "Image not available";

const IMAGE_GAP: f32 = 20.0;
const PLACEHOLDER_STROKE_GRAY: u8 = 170;
const PLACEHOLDER_FONT_SIZE: f32 = 16.0;

const ARTIST_FONT_SIZE: f32 = 22.0;
const WORK_FONT_SIZE: f32 = 12.0;
const HEADING_FONT_SIZE: f32 = 12.0;
const BODY_FONT_SIZE: f32 = 11.0;
const BODY_LINE_HEIGHT: f32 = 14.0;
const BLOCK_GAP: f32 = 4.0;

const TABLE_FONT_SIZE: f32 = 10.0;
const TABLE_PADDING: f32 = 6.0;
const TABLE_LINE_FACTOR: f32 = 1.15;
const TABLE_HEAD_FILL: u8 = 240;
const TABLE_HEAD_TEXT: u8 = 20;
const TABLE_BODY_TEXT: u8 = 80;
const TABLE_LINE_GRAY: u8 = 200;

/// 标准 14 字体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    SerifRegular,
    SerifBold,
    Sans,
}

/// 单条绘制指令
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: FontFace,
        size: f32,
        gray: u8,
        text: String,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: usize, // FactSheetDocument::images 下标
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke: Option<u8>,
        fill: Option<u8>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactSheetPage {
    pub ops: Vec<DrawOp>,
}

impl FactSheetPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// 事实表文档（绘制指令 + 图片资源）
#[derive(Debug, Clone, PartialEq)]
pub struct FactSheetDocument {
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<FactSheetPage>,
    pub images: Vec<PreparedImage>,
}

impl FactSheetDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 全部文字（按页、按绘制顺序）
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(FactSheetPage::texts)
    }

    pub fn has_placeholder(&self) -> bool {
        self.texts().any(|t| t == PLACEHOLDER_CAPTION)
    }
}

// ==========================================
// 版式游标
// ==========================================
struct LayoutCursor<'a> {
    cfg: &'a FactSheetLayoutConfig,
    doc: FactSheetDocument,
    y: f32,
}

impl<'a> LayoutCursor<'a> {
    fn new(cfg: &'a FactSheetLayoutConfig) -> Self {
        Self {
            cfg,
            doc: FactSheetDocument {
                page_width: cfg.page_width,
                page_height: cfg.page_height,
                pages: vec![FactSheetPage::default()],
                images: Vec::new(),
            },
            y: cfg.margin,
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.doc.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn new_page(&mut self) {
        self.doc.pages.push(FactSheetPage::default());
        self.y = self.cfg.margin;
    }

    fn break_if_low(&mut self) {
        if self.y > self.cfg.low_water_mark {
            self.new_page();
        }
    }

    fn text_at(&mut self, x: f32, y: f32, font: FontFace, size: f32, gray: u8, text: &str) {
        self.push(DrawOp::Text {
            x,
            y,
            font,
            size,
            gray,
            text: text.to_string(),
        });
    }

    /// 在左边距、当前 y 处写一行黑色文字
    fn line(&mut self, font: FontFace, size: f32, text: &str) {
        let (x, y) = (self.cfg.margin, self.y);
        self.text_at(x, y, font, size, 0, text);
    }

    fn finish(self) -> FactSheetDocument {
        self.doc
    }
}

/// 非空（去空白后）文本
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// 生成事实表版式
pub fn layout_fact_sheet(artwork: &ArtworkRecord, cfg: &FactSheetLayoutConfig) -> FactSheetDocument {
    let mut cursor = LayoutCursor::new(cfg);

    layout_image(&mut cursor, artwork);
    layout_header(&mut cursor, artwork);

    let blocks = [
        ("Provenance", &artwork.provenance),
        ("Exhibition", &artwork.exhibition),
        ("Literature", &artwork.literature),
        ("Owner Information", &artwork.owner_info),
    ];
    for (heading, body) in blocks {
        if let Some(body) = present(body) {
            layout_block(&mut cursor, heading, body);
        }
    }

    layout_metadata_table(&mut cursor, artwork);
    cursor.finish()
}

fn layout_image(cursor: &mut LayoutCursor<'_>, artwork: &ArtworkRecord) {
    let cfg = cursor.cfg;
    let prepared = artwork.image_data.as_ref().and_then(prepare_image);

    match prepared {
        Some(image) => {
            let (width, height) = fit_image(
                image.width as f32,
                image.height as f32,
                cfg.content_width(),
                cfg.image_max_height,
            );
            let index = cursor.doc.images.len();
            cursor.doc.images.push(image);
            cursor.push(DrawOp::Image {
                x: (cfg.page_width - width) / 2.0,
                y: cursor.y,
                width,
                height,
                image: index,
            });
            cursor.y += height + IMAGE_GAP;
        }
        None => {
            let top = cursor.y;
            cursor.push(DrawOp::Rect {
                x: cfg.margin,
                y: top,
                width: cfg.content_width(),
                height: cfg.placeholder_height,
                stroke: Some(PLACEHOLDER_STROKE_GRAY),
                fill: None,
            });
            cursor.text_at(
                cfg.margin + 8.0,
                top + 18.0,
                FontFace::Sans,
                PLACEHOLDER_FONT_SIZE,
                0,
                PLACEHOLDER_CAPTION,
            );
            cursor.y += cfg.placeholder_height + IMAGE_GAP;
        }
    }
}

fn layout_header(cursor: &mut LayoutCursor<'_>, artwork: &ArtworkRecord) {
    cursor.line(FontFace::SerifBold, ARTIST_FONT_SIZE, &artwork.artist);
    cursor.y += 22.0;

    let work_line = match present(&artwork.year) {
        Some(year) => format!("{}, {}", artwork.title, year),
        None => artwork.title.clone(),
    };
    cursor.line(FontFace::SerifRegular, WORK_FONT_SIZE, &work_line);
    cursor.y += 18.0;

    for value in [&artwork.medium, &artwork.dimensions] {
        if let Some(value) = present(value) {
            cursor.line(FontFace::SerifRegular, WORK_FONT_SIZE, value);
            cursor.y += 16.0;
        }
    }
}

/// 叙述段落：标题不跨页重复，正文逐行检查换页
fn layout_block(cursor: &mut LayoutCursor<'_>, heading: &str, body: &str) {
    cursor.break_if_low();
    cursor.line(FontFace::SerifBold, HEADING_FONT_SIZE, heading);
    cursor.y += 14.0;

    for line in wrap_text(body, BODY_FONT_SIZE, cursor.cfg.content_width()) {
        cursor.break_if_low();
        cursor.line(FontFace::SerifRegular, BODY_FONT_SIZE, &line);
        cursor.y += BODY_LINE_HEIGHT;
    }
    cursor.y += BLOCK_GAP;
}

/// 元数据表的行（仅包含已填写的字段；金额为 0 视同未填）
pub fn metadata_rows(artwork: &ArtworkRecord) -> Vec<(&'static str, String)> {
    let nonzero = |value: Option<f64>| value.filter(|v| *v != 0.0);
    let mut rows = Vec::new();
    if let Some(price) = nonzero(artwork.price) {
        rows.push(("Appraisal value", format_money(price)));
    }
    if let Some(insurance) = nonzero(artwork.insurance_value) {
        rows.push(("Insurance value", format_money(insurance)));
    }
    if let Some(location) = present(&artwork.location) {
        rows.push(("Location", location.to_string()));
    }
    rows
}

fn layout_metadata_table(cursor: &mut LayoutCursor<'_>, artwork: &ArtworkRecord) {
    let rows = metadata_rows(artwork);
    if rows.is_empty() {
        return;
    }

    let cfg = cursor.cfg;
    cursor.break_if_low();

    let line_height = TABLE_FONT_SIZE * TABLE_LINE_FACTOR;
    let label_width = std::iter::once("Field")
        .chain(rows.iter().map(|(label, _)| *label))
        .map(|label| text_width(label, TABLE_FONT_SIZE))
        .fold(0.0_f32, f32::max)
        + TABLE_PADDING * 2.0;
    let value_width = cfg.content_width() - label_width;

    let mut table: Vec<(bool, String, Vec<String>)> = vec![(true, "Field".to_string(), vec!["Value".to_string()])];
    for (label, value) in rows {
        let lines = wrap_text(&value, TABLE_FONT_SIZE, value_width - TABLE_PADDING * 2.0);
        table.push((false, label.to_string(), lines));
    }

    let row_height = |lines: usize| lines.max(1) as f32 * line_height + TABLE_PADDING * 2.0;
    let table_height: f32 = table.iter().map(|(_, _, lines)| row_height(lines.len())).sum();
    // 已在页首时不再换页，超高表格直接向下排
    if cursor.y > cfg.margin && cursor.y + table_height > cfg.page_height - cfg.margin {
        cursor.new_page();
    }

    let x_label = cfg.margin;
    let x_value = cfg.margin + label_width;
    for (is_head, label, lines) in table {
        let top = cursor.y;
        let height = row_height(lines.len());
        let (font, gray, fill) = if is_head {
            (FontFace::SerifBold, TABLE_HEAD_TEXT, Some(TABLE_HEAD_FILL))
        } else {
            (FontFace::SerifRegular, TABLE_BODY_TEXT, None)
        };

        for (x, width) in [(x_label, label_width), (x_value, value_width)] {
            cursor.push(DrawOp::Rect {
                x,
                y: top,
                width,
                height,
                stroke: Some(TABLE_LINE_GRAY),
                fill,
            });
        }

        let first_baseline = top + TABLE_PADDING + TABLE_FONT_SIZE * 0.85;
        cursor.text_at(x_label + TABLE_PADDING, first_baseline, font, TABLE_FONT_SIZE, gray, &label);
        for (idx, line) in lines.iter().enumerate() {
            let y = first_baseline + idx as f32 * line_height;
            cursor.text_at(x_value + TABLE_PADDING, y, font, TABLE_FONT_SIZE, gray, line);
        }

        cursor.y += height;
    }
}
