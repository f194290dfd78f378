/// 去重文本累积器
///
/// 只拒绝与上一条完全相同的文本（相邻去重，非全局）：
/// 同一画面连续触发变化时 OCR 往往给出相同文本，
/// 但隔了不同内容之后重现的文本仍然保留。
#[derive(Debug, Default)]
pub struct TextAccumulator {
    blocks: Vec<String>,
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// 接受一段候选文本；先去首尾空白。
    /// 空白候选、或与上一条接受的文本完全相等（大小写与内部空白敏感）时
    /// 返回 false 且不产生任何变更。
    pub fn accept(&mut self, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return false;
        }
        if self.blocks.last().map(String::as_str) == Some(trimmed) {
            return false;
        }
        self.blocks.push(trimmed.to_string());
        true
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
