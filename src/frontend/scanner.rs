use crate::lang::Instruction;

/// Location of a symbol in the source.
///
/// `offset` counts Unicode scalar values from the start of the source (a
/// multi-byte character advances it by one). `line` and `col` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} (offset {})", self.line, self.col, self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned {
    pub instr: Instruction,
    pub span: Span,
}

/// Lazy left-to-right scan over source text.
///
/// Yields one `Spanned` per recognized symbol and silently steps over every
/// other character, so whitespace, letters and any other text act as
/// comments.
pub struct Scanner<'src> {
    chars: std::str::Chars<'src>,
    offset: usize,
    line: usize,
    col: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            chars: source.chars(),
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    fn span(&self) -> Span {
        Span {
            offset: self.offset,
            line: self.line,
            col: self.col,
        }
    }

    fn advance(&mut self) -> Option<(char, Span)> {
        let ch = self.chars.next()?;
        let span = self.span();
        self.offset += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some((ch, span))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Spanned;

    fn next(&mut self) -> Option<Spanned> {
        while let Some((ch, span)) = self.advance() {
            if let Some(instr) = Instruction::from_char(ch) {
                return Some(Spanned { instr, span });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrs(source: &str) -> Vec<Instruction> {
        Scanner::new(source).map(|s| s.instr).collect()
    }

    #[test]
    fn test_all_symbols() {
        assert_eq!(
            instrs("><+-.,[]"),
            vec![
                Instruction::PointerIncrement,
                Instruction::PointerDecrement,
                Instruction::CellIncrement,
                Instruction::CellDecrement,
                Instruction::Output,
                Instruction::Input,
                Instruction::LoopOpen,
                Instruction::LoopClose,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            instrs("add one: + \n then print it ."),
            vec![Instruction::CellIncrement, Instruction::Output]
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(instrs("").is_empty());
        assert!(instrs("just words").is_empty());
    }

    #[test]
    fn test_spans_track_lines_and_columns() {
        let spans: Vec<Span> = Scanner::new("+\n  ]").map(|s| s.span).collect();
        assert_eq!(
            spans,
            vec![
                Span {
                    offset: 0,
                    line: 1,
                    col: 1
                },
                Span {
                    offset: 4,
                    line: 2,
                    col: 3
                },
            ]
        );
    }

    #[test]
    fn test_multibyte_characters_count_once() {
        // 'é' is two bytes and '→' three, each one code point
        let spans: Vec<Span> = Scanner::new("é→+").map(|s| s.span).collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].offset, 2);
        assert_eq!(spans[0].col, 3);
    }
}
