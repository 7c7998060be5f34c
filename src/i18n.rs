// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文，用于命令行输出
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 应用配置中的语言；不支持的语言回落到 en
///
/// # 返回
/// - 实际生效的语言代码
pub fn apply_locale(locale: &str) -> String {
    let available = rust_i18n::available_locales!();
    let chosen = if available.iter().any(|l| *l == locale) {
        locale
    } else {
        tracing::warn!(locale = %locale, "不支持的语言，回落到 en");
        "en"
    };
    set_locale(chosen);
    chosen.to_string()
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use art_advisory::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use art_advisory::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/test.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
