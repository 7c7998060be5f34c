// ==========================================
// 艺术品顾问系统 - 事实表图片准备
// ==========================================
// 职责: 内联图片 → 可嵌入 PDF 的 RGB 位图（Flate 压缩）
// 规则: 解码失败返回 None，调用方降级为占位框
// ==========================================

use crate::domain::artwork::InlineImage;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{DynamicImage, GenericImageView};
use std::io::Write;
use tracing::debug;

/// 已解码、可直接写入 PDF 的图片
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// DeviceRGB，8 bit，zlib 压缩
    pub data: Vec<u8>,
}

/// 解码内联图片
///
/// # 返回
/// - Some(PreparedImage): 解码成功
/// - None: base64 非法、格式无法识别、尺寸为 0
pub fn prepare_image(inline: &InlineImage) -> Option<PreparedImage> {
    let bytes = match inline.decode() {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "图片 base64 解码失败");
            return None;
        }
    };

    let decoded = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            debug!(error = %e, "图片解码失败");
            return None;
        }
    };

    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let rgb = flatten_on_white(&decoded);
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&rgb).ok()?;
    let data = encoder.finish().ok()?;

    Some(PreparedImage {
        width,
        height,
        data,
    })
}

/// 透明像素按白底合成，输出 RGB 字节
fn flatten_on_white(img: &DynamicImage) -> Vec<u8> {
    let rgba = img.to_rgba8();
    let mut out = Vec::with_capacity(rgba.width() as usize * rgba.height() as usize * 3);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let alpha = a as u32;
        for channel in [r, g, b] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            out.push(blended as u8);
        }
    }
    out
}

/// 等比缩放：先按宽度约束，再按高度约束
///
/// # 返回
/// - (width, height)（pt）
pub fn fit_image(width: f32, height: f32, max_width: f32, max_height: f32) -> (f32, f32) {
    let (mut w, mut h) = (width, height);
    if w > max_width {
        h = max_width / w * h;
        w = max_width;
    }
    if h > max_height {
        w = max_height / h * w;
        h = max_height;
    }
    (w, h)
}
