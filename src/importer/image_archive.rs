// ==========================================
// 艺术品顾问系统 - 图片压缩包预解压
// ==========================================
// 职责: ZIP → { 基础文件名 → 内联图片 }
// 约束: 仅 jpg/jpeg/png；其他扩展名静默忽略；目录层级被剥离
// ==========================================

use crate::domain::artwork::InlineImage;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// 图片映射：基础文件名 → 内联图片
pub type ImageMap = HashMap<String, InlineImage>;

/// 按扩展名判断 MIME（不支持的返回 None）
pub fn image_mime_for(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit('.').next()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// 从文件路径读取图片压缩包
pub fn load_image_archive(path: &Path) -> ImportResult<ImageMap> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    read_image_archive(file)
}

/// 从任意 Read + Seek 读取图片压缩包
pub fn read_image_archive<R: Read + Seek>(reader: R) -> ImportResult<ImageMap> {
    let mut archive = ZipArchive::new(reader)?;
    let mut images = ImageMap::new();

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;
        if entry.is_dir() {
            continue;
        }

        let base = entry
            .name()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        let Some(mime) = image_mime_for(&base) else {
            debug!(entry = %entry.name(), "跳过非图片条目");
            continue;
        };

        // 不按条目声明的大小预分配
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        images.insert(base, InlineImage::from_bytes(mime, &bytes));
    }

    debug!(count = images.len(), "图片压缩包解析完成");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::<()>::default();
        for (name, data) in entries {
            zip.start_file(name.to_string(), options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_image_mime_for() {
        assert_eq!(image_mime_for("a.JPG"), Some("image/jpeg"));
        assert_eq!(image_mime_for("a.jpeg"), Some("image/jpeg"));
        assert_eq!(image_mime_for("a.png"), Some("image/png"));
        assert_eq!(image_mime_for("a.gif"), None);
        assert_eq!(image_mime_for("noext"), None);
    }

    #[test]
    fn test_read_image_archive_strips_paths_and_filters() {
        let bytes = build_zip(&[
            ("photos/nested/one.jpg", b"jpegdata"),
            ("two.PNG", b"pngdata"),
            ("readme.txt", b"ignored"),
        ]);

        let images = read_image_archive(Cursor::new(bytes)).unwrap();

        assert_eq!(images.len(), 2);
        let one = images.get("one.jpg").unwrap();
        assert_eq!(one.mime_type(), Some("image/jpeg"));
        assert_eq!(one.decode().unwrap(), b"jpegdata".to_vec());
        assert_eq!(images.get("two.PNG").unwrap().mime_type(), Some("image/png"));
        assert!(!images.contains_key("readme.txt"));
    }

    #[test]
    fn test_read_image_archive_large_entry() {
        let big = vec![7u8; 256 * 1024];
        let bytes = build_zip(&[("big.png", big.as_slice())]);

        let images = read_image_archive(Cursor::new(bytes)).unwrap();

        assert_eq!(images.get("big.png").unwrap().decode().unwrap().len(), big.len());
    }

    #[test]
    fn test_read_image_archive_rejects_garbage() {
        let result = read_image_archive(Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(result, Err(ImportError::ArchiveError(_))));
    }
}
