//! Line-oriented output buffer with indentation.

const INDENT: &str = "  ";

/// Accumulates generated text one line at a time.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Open a `{` block: print `header {` and indent.
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Close the innermost block with `}`.
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_blocks_indent() {
        let mut p = Printer::new();
        p.open("export namespace Outer");
        p.open("export class Inner");
        p.line("foo(): void;");
        p.close();
        p.blank();
        p.close();
        assert_eq!(
            p.finish(),
            "export namespace Outer {\n  export class Inner {\n    foo(): void;\n  }\n\n}\n"
        );
    }

    #[test]
    fn empty_line_has_no_trailing_whitespace() {
        let mut p = Printer::new();
        p.open("a");
        p.line("");
        p.close();
        assert_eq!(p.finish(), "a {\n\n}\n");
    }
}
