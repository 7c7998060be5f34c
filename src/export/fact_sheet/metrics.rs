// ==========================================
// 艺术品顾问系统 - 字体度量与折行
// ==========================================
// 职责: Times-Roman 字宽、按内容宽度贪心折行、WinAnsi 编码
// 说明: 使用 PDF 标准 14 字体，不嵌入字体文件
// ==========================================

/// Times-Roman 字宽（1/1000 em），覆盖 ASCII 32..=126
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // ' '..'/'
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444, // '0'..'?'
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, // '@'..'O'
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500, // 'P'..'_'
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, // '`'..'o'
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, // 'p'..'~'
];

/// 表外字符的估算字宽
const DEFAULT_CHAR_WIDTH: u16 = 500;

fn char_width(ch: char) -> u16 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        TIMES_ROMAN_WIDTHS[(code - 32) as usize]
    } else {
        DEFAULT_CHAR_WIDTH
    }
}

/// 文本宽度（pt）
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    units as f32 * font_size / 1000.0
}

/// 按最大宽度折行
///
/// 规则: 先按换行符分段；段内按空格贪心填充；
/// 单词本身超宽时按字符拆开
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.replace("\r\n", "\n").split('\n') {
        wrap_paragraph(paragraph, font_size, max_width, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, font_size: f32, max_width: f32, lines: &mut Vec<String>) {
    let space = text_width(" ", font_size);
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
        let word_width = text_width(word, font_size);

        if !current.is_empty() && current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
        } else {
            // 超长单词按字符切分，最后一段留作当前行继续拼接
            let mut chunks = split_long_word(word, font_size, max_width);
            if let Some(last) = chunks.pop() {
                lines.extend(chunks);
                current_width = text_width(&last, font_size);
                current = last;
            }
        }
    }

    // 空段落保留为空行
    lines.push(current);
}

fn split_long_word(word: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut width = 0.0_f32;
    for ch in word.chars() {
        let w = char_width(ch) as f32 * font_size / 1000.0;
        if !chunk.is_empty() && width + w > max_width {
            chunks.push(std::mem::take(&mut chunk));
            width = 0.0;
        }
        chunk.push(ch);
        width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

/// 编码为 WinAnsiEncoding；无法表示的字符替换为 `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            '×' => 0xd7,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Hi" = 722 + 278
        assert!((text_width("Hi", 10.0) - 10.0).abs() < 1e-4);
        assert_eq!(text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_wrap_text_greedy() {
        // 每个 "aaaa" = 4 * 444 = 1776 单位；10pt 时约 17.76pt，空格 2.5pt
        let lines = wrap_text("aaaa aaaa aaaa", 10.0, 40.0);
        assert_eq!(lines, vec!["aaaa aaaa", "aaaa"]);
    }

    #[test]
    fn test_wrap_text_keeps_paragraphs() {
        let lines = wrap_text("first\r\n\nsecond", 11.0, 500.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_text_splits_long_word() {
        let word = "m".repeat(30); // 30 * 7.78pt @10pt
        let lines = wrap_text(&word, 10.0, 100.0);
        assert!(lines.len() >= 3);
        assert_eq!(lines.concat(), word);
        assert!(lines.iter().all(|l| text_width(l, 10.0) <= 100.0));
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Café"), vec![b'C', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("20 × 16"), vec![b'2', b'0', b' ', 0xd7, b' ', b'1', b'6']);
        assert_eq!(encode_win_ansi("“x”—"), vec![0x93, b'x', 0x94, 0x97]);
        assert_eq!(encode_win_ansi("中"), vec![b'?']);
    }
}
