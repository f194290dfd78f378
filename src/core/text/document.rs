use std::fs;
use std::io;
use std::path::Path;

pub const DIVIDER_GLYPH: char = '─';
pub const DIVIDER_WIDTH: usize = 40;

/// 文档组装：每个文本块后跟一条固定宽度的分隔线段落
pub struct DocumentWriter {
    divider: String,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self {
            divider: DIVIDER_GLYPH.to_string().repeat(DIVIDER_WIDTH),
        }
    }

    pub fn render(&self, blocks: &[String]) -> String {
        let mut out = String::new();
        for block in blocks {
            out.push_str(block);
            out.push('\n');
            out.push_str(&self.divider);
            out.push('\n');
        }
        out
    }

    /// 写入目标路径，已存在的文件被覆盖
    pub fn write(&self, blocks: &[String], path: &Path) -> io::Result<()> {
        fs::write(path, self.render(blocks))
    }
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_divider_per_block_in_order() {
        let writer = DocumentWriter::new();
        let rendered = writer.render(&blocks(&["first", "second", "third"]));

        let divider = DIVIDER_GLYPH.to_string().repeat(DIVIDER_WIDTH);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            [
                "first",
                divider.as_str(),
                "second",
                divider.as_str(),
                "third",
                divider.as_str(),
            ]
        );
    }

    #[test]
    fn test_divider_width() {
        let writer = DocumentWriter::new();
        let rendered = writer.render(&blocks(&["x"]));
        let divider_line = rendered.lines().nth(1).unwrap();
        assert_eq!(divider_line.chars().count(), 40);
        assert!(divider_line.chars().all(|c| c == '─'));
    }

    #[test]
    fn test_multiline_block_kept_together() {
        let writer = DocumentWriter::new();
        let rendered = writer.render(&blocks(&["line one\nline two"]));
        assert!(rendered.starts_with("line one\nline two\n─"));
    }

    #[test]
    fn test_empty_sequence_renders_empty_document() {
        let writer = DocumentWriter::new();
        assert_eq!(writer.render(&[]), "");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale content that is much longer than the new one").unwrap();

        let writer = DocumentWriter::new();
        writer.write(&blocks(&["fresh"]), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("fresh\n"));
        assert!(!content.contains("stale"));
    }
}
