//! Code text extraction from a block's line slices.

use crate::markdown::block::LineSlice;

/// Concatenated text of a code block plus its first line, used for language
/// detection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CodeText<'b> {
    pub text: String,
    pub first_line: Option<&'b str>,
}

/// Join every line that has text with `\n`. Lines without a buffer are
/// skipped; no trailing newline is added.
pub fn extract<'b>(lines: &'b [LineSlice<'_>]) -> CodeText<'b> {
    let mut code = CodeText::default();
    for line in lines.iter().filter_map(LineSlice::as_str) {
        if code.first_line.is_none() {
            code.first_line = Some(line);
        } else {
            code.text.push('\n');
        }
        code.text.push_str(line);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines() {
        let lines = [LineSlice::whole("a"), LineSlice::whole("b"), LineSlice::whole("c")];
        let code = extract(&lines);
        assert_eq!(code.text, "a\nb\nc");
        assert_eq!(code.first_line, Some("a"));
    }

    #[test]
    fn test_skip_lines_without_text() {
        let lines = [LineSlice::detached(), LineSlice::whole("x"), LineSlice::detached()];
        let code = extract(&lines);
        assert_eq!(code.text, "x");
        assert_eq!(code.first_line, Some("x"));

        let blank = [LineSlice::detached(), LineSlice::detached()];
        let code = extract(&blank);
        assert_eq!(code, CodeText::default());
    }

    #[test]
    fn test_empty_lines_kept() {
        let lines = [LineSlice::whole("a"), LineSlice::whole(""), LineSlice::whole("b")];
        assert_eq!(extract(&lines).text, "a\n\nb");
    }
}
