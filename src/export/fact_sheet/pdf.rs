// ==========================================
// 艺术品顾问系统 - 事实表 PDF 序列化
// ==========================================
// 职责: FactSheetDocument → PDF 字节（pdf-writer）
// 约定: 标准 14 字体 + WinAnsiEncoding；内容流 Flate 压缩
// ==========================================

use super::layout::{DrawOp, FactSheetDocument, FontFace};
use super::metrics::encode_win_ansi;
use crate::export::error::ExportResult;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str};
use std::io::Write;

const FONT_SERIF: &[u8] = b"F1";
const FONT_SERIF_BOLD: &[u8] = b"F2";
const FONT_SANS: &[u8] = b"F3";

fn font_name(face: FontFace) -> Name<'static> {
    match face {
        FontFace::SerifRegular => Name(FONT_SERIF),
        FontFace::SerifBold => Name(FONT_SERIF_BOLD),
        FontFace::Sans => Name(FONT_SANS),
    }
}

fn gray(level: u8) -> f32 {
    level as f32 / 255.0
}

fn deflate(data: &[u8]) -> ExportResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// 序列化为 PDF
pub fn write_pdf(doc: &FactSheetDocument) -> ExportResult<Vec<u8>> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let font_ids = [alloc.bump(), alloc.bump(), alloc.bump()];
    let image_ids: Vec<Ref> = doc.images.iter().map(|_| alloc.bump()).collect();
    let page_ids: Vec<(Ref, Ref)> = doc.pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();
    let image_names: Vec<String> = (0..doc.images.len()).map(|i| format!("Im{}", i)).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    // === 字体 ===
    for (id, base) in font_ids
        .iter()
        .zip([&b"Times-Roman"[..], &b"Times-Bold"[..], &b"Helvetica"[..]])
    {
        pdf.type1_font(*id)
            .base_font(Name(base))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    // === 图片 XObject ===
    for (id, image) in image_ids.iter().zip(&doc.images) {
        let mut xobject = pdf.image_xobject(*id, &image.data);
        xobject.filter(Filter::FlateDecode);
        xobject.width(image.width as i32);
        xobject.height(image.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        xobject.finish();
    }

    // === 页面 ===
    for (page, (page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
        let mut page_writer = pdf.page(*page_id);
        page_writer
            .media_box(Rect::new(0.0, 0.0, doc.page_width, doc.page_height))
            .parent(tree_id)
            .contents(*content_id);

        let mut resources = page_writer.resources();
        {
            let mut fonts = resources.fonts();
            fonts.pair(Name(FONT_SERIF), font_ids[0]);
            fonts.pair(Name(FONT_SERIF_BOLD), font_ids[1]);
            fonts.pair(Name(FONT_SANS), font_ids[2]);
        }
        if !image_ids.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, id) in image_names.iter().zip(&image_ids) {
                xobjects.pair(Name(name.as_bytes()), *id);
            }
        }
        resources.finish();
        page_writer.finish();

        let content = render_page(doc.page_height, &page.ops, &image_names);
        pdf.stream(*content_id, &deflate(&content)?)
            .filter(Filter::FlateDecode);
    }

    Ok(pdf.finish())
}

/// 单页内容流（左上原点 → PDF 左下原点）
fn render_page(page_height: f32, ops: &[DrawOp], image_names: &[String]) -> Vec<u8> {
    let mut content = Content::new();

    for op in ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                gray: level,
                text,
            } => {
                let encoded = encode_win_ansi(text);
                content.set_fill_gray(gray(*level));
                content.begin_text();
                content.set_font(font_name(*font), *size);
                content.next_line(*x, page_height - *y);
                content.show(Str(&encoded));
                content.end_text();
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
                image,
            } => {
                let Some(name) = image_names.get(*image) else {
                    continue;
                };
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, page_height - *y - *height]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                stroke,
                fill,
            } => {
                content.save_state();
                content.set_line_width(0.5);
                content.rect(*x, page_height - *y - *height, *width, *height);
                match (stroke, fill) {
                    (Some(s), Some(f)) => {
                        content.set_stroke_gray(gray(*s));
                        content.set_fill_gray(gray(*f));
                        content.fill_nonzero_and_stroke();
                    }
                    (Some(s), None) => {
                        content.set_stroke_gray(gray(*s));
                        content.stroke();
                    }
                    (None, Some(f)) => {
                        content.set_fill_gray(gray(*f));
                        content.fill_nonzero();
                    }
                    (None, None) => {
                        content.end_path();
                    }
                }
                content.restore_state();
            }
        }
    }

    content.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FactSheetLayoutConfig;
    use crate::domain::artwork::ArtworkRecord;
    use crate::export::fact_sheet::layout::layout_fact_sheet;

    #[test]
    fn test_write_pdf_structure() {
        let art = ArtworkRecord {
            artist: "Jane Doe".to_string(),
            title: "Untitled".to_string(),
            provenance: Some("word ".repeat(2000)),
            ..Default::default()
        };
        let doc = layout_fact_sheet(&art, &FactSheetLayoutConfig::default());
        let bytes = write_pdf(&doc).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Times-Roman"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(text.contains(&format!("/Count {}", doc.page_count())));
        assert!(text.trim_end().ends_with("%%EOF"));
    }
}
