/// 全角空格
const FULL_WIDTH_SPACE: char = '\u{3000}';

/// 清理单个选项文本
///
/// 全角空格替换为半角空格，连续空白折叠为一个空格，并去除首尾空白。
/// 对同一文本重复调用结果不变。
pub fn sanitize_choice(text: &str) -> String {
    text.replace(FULL_WIDTH_SPACE, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
