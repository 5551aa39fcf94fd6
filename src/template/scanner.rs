//! Single-pass template scanner.
//!
//! Splits a template into [`Segment`]s without allocating. The scanner is a
//! two-state machine: outside a placeholder it copies literal text up to the
//! next start delimiter; inside one it looks for the end delimiter, and
//! gives up on the current placeholder (keeping its text as literal) when a
//! new start delimiter, the end of input, or the body length limit comes
//! first.
//!
//! Every byte of the input ends up in exactly one segment, so writing all
//! segments back verbatim reproduces the template, except for escape
//! prefixes which are dropped.

use crate::config::schema::Syntax;

/// A span of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim.
    Literal(&'a str),

    /// A start delimiter written literally via the escape prefix.
    Escaped(&'a str),

    /// A delimited placeholder.
    Placeholder {
        /// Full text including delimiters, emitted when unresolved.
        raw: &'a str,
        /// Text between the delimiters.
        body: &'a str,
    },

    /// A start delimiter with no end delimiter before the input ran out.
    /// Holds the rest of the template from that delimiter on.
    Unterminated(&'a str),
}

/// Scanner state between calls to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Copying text from `pos`.
    Literal,
    /// A start delimiter begins at `pos`.
    InPlaceholder,
    /// Input exhausted.
    Done,
}

/// Iterator over the segments of a template.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    syntax: &'a Syntax,
    max_body: usize,
    pos: usize,
    state: State,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner. Bodies longer than `max_body` bytes are not
    /// treated as placeholders.
    #[must_use]
    pub const fn new(input: &'a str, syntax: &'a Syntax, max_body: usize) -> Self {
        Self {
            input,
            syntax,
            max_body,
            pos: 0,
            state: State::Literal,
        }
    }

    fn literal_step(&mut self) -> Option<Segment<'a>> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            self.state = State::Done;
            return None;
        }
        // An empty start delimiter matches everywhere; treat it as none.
        let start = self.syntax.start.as_str();
        let found = if start.is_empty() { None } else { rest.find(start) };
        let Some(offset) = found else {
            self.pos = self.input.len();
            self.state = State::Done;
            return Some(Segment::Literal(rest));
        };

        let text = &rest[..offset];
        if let Some(escape) = self.syntax.escape.as_deref()
            && !escape.is_empty()
            && text.ends_with(escape)
        {
            let before = &text[..text.len() - escape.len()];
            let delimiter = &rest[offset..offset + start.len()];
            if before.is_empty() {
                self.pos += offset + start.len();
                return Some(Segment::Escaped(delimiter));
            }
            // Emit the text first; the escape is handled on the next call
            // because `pos` still points at it.
            self.pos += before.len();
            return Some(Segment::Literal(before));
        }

        self.pos += offset;
        self.state = State::InPlaceholder;
        if text.is_empty() {
            self.placeholder_step()
        } else {
            Some(Segment::Literal(text))
        }
    }

    fn placeholder_step(&mut self) -> Option<Segment<'a>> {
        let open = self.pos;
        let body_start = open + self.syntax.start.len();
        let after = &self.input[body_start..];

        // Only search for the end delimiter up to the next start delimiter,
        // so each byte is examined a bounded number of times.
        let restart = after.find(self.syntax.start.as_str());
        let window = &after[..restart.unwrap_or(after.len())];

        let Some(close) = window.find(self.syntax.end.as_str()) else {
            return Some(match restart {
                Some(next) => {
                    // A new placeholder starts before this one closed: keep
                    // what we have as literal and rescan from the new start.
                    // An escaped start goes back through the literal state.
                    let restart_at = body_start + next;
                    let kept = &self.input[open..restart_at];
                    let escape_len = self
                        .syntax
                        .escape
                        .as_deref()
                        .filter(|escape| {
                            !escape.is_empty()
                                && kept.ends_with(escape)
                                && kept.len() - escape.len() >= self.syntax.start.len()
                        })
                        .map_or(0, str::len);
                    self.pos = restart_at - escape_len;
                    self.state = if escape_len == 0 {
                        State::InPlaceholder
                    } else {
                        State::Literal
                    };
                    Segment::Literal(&self.input[open..self.pos])
                }
                None => {
                    self.pos = self.input.len();
                    self.state = State::Done;
                    Segment::Unterminated(&self.input[open..])
                }
            });
        };

        if close > self.max_body {
            tracing::debug!(
                length = close,
                limit = self.max_body,
                "placeholder body exceeds limit, treating as literal"
            );
            self.pos = body_start;
            self.state = State::Literal;
            return Some(Segment::Literal(&self.input[open..body_start]));
        }

        let end = body_start + close + self.syntax.end.len();
        self.pos = end;
        self.state = State::Literal;
        Some(Segment::Placeholder {
            raw: &self.input[open..end],
            body: &after[..close],
        })
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Literal => self.literal_step(),
            State::InPlaceholder => self.placeholder_step(),
            State::Done => None,
        }
    }
}

/// Returns `true` if `input` contains a start delimiter followed somewhere
/// by an end delimiter.
#[must_use]
pub fn has_placeholders(input: &str, syntax: &Syntax) -> bool {
    !syntax.start.is_empty()
        && input
            .find(syntax.start.as_str())
            .is_some_and(|at| input[at + syntax.start.len()..].contains(syntax.end.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<Segment<'_>> {
        static SYNTAX: std::sync::LazyLock<Syntax> = std::sync::LazyLock::new(Syntax::default);
        Scanner::new(input, &SYNTAX, 1024).collect()
    }

    fn concat(segments: &[Segment<'_>]) -> String {
        segments
            .iter()
            .map(|s| match s {
                Segment::Literal(t) | Segment::Escaped(t) | Segment::Unterminated(t) => *t,
                Segment::Placeholder { raw, .. } => *raw,
            })
            .collect()
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(scan("hello world"), [Segment::Literal("hello world")]);
    }

    #[test]
    fn single_placeholder() {
        assert_eq!(
            scan("Order placed on ${RANDOM_DATE}."),
            [
                Segment::Literal("Order placed on "),
                Segment::Placeholder {
                    raw: "${RANDOM_DATE}",
                    body: "RANDOM_DATE"
                },
                Segment::Literal("."),
            ]
        );
    }

    #[test]
    fn adjacent_placeholders() {
        assert_eq!(
            scan("${A}${B}"),
            [
                Segment::Placeholder { raw: "${A}", body: "A" },
                Segment::Placeholder { raw: "${B}", body: "B" },
            ]
        );
    }

    #[test]
    fn unterminated_keeps_tail() {
        assert_eq!(
            scan("x ${RANDOM_DATE"),
            [Segment::Literal("x "), Segment::Unterminated("${RANDOM_DATE")]
        );
    }

    #[test]
    fn nested_start_restarts_placeholder() {
        assert_eq!(
            scan("${a ${B} c"),
            [
                Segment::Literal("${a "),
                Segment::Placeholder { raw: "${B}", body: "B" },
                Segment::Literal(" c"),
            ]
        );
    }

    #[test]
    fn escape_emits_delimiter() {
        assert_eq!(
            scan("cost $${X}"),
            [
                Segment::Literal("cost "),
                Segment::Escaped("${"),
                Segment::Literal("X}"),
            ]
        );
    }

    #[test]
    fn escape_after_unclosed_start() {
        assert_eq!(
            scan("${a $${X}"),
            [
                Segment::Literal("${a "),
                Segment::Escaped("${"),
                Segment::Literal("X}"),
            ]
        );
        assert_eq!(
            scan("${$${X}"),
            [
                Segment::Literal("${"),
                Segment::Escaped("${"),
                Segment::Literal("X}"),
            ]
        );
    }

    #[test]
    fn dollar_without_brace_is_literal() {
        assert_eq!(scan("$100 and $$"), [Segment::Literal("$100 and $$")]);
    }

    #[test]
    fn oversized_body_is_literal() {
        let syntax = Syntax::default();
        let input = "${ABCDEFGHIJ} ${OK}";
        let segments: Vec<_> = Scanner::new(input, &syntax, 4).collect();
        assert_eq!(
            segments,
            [
                Segment::Literal("${"),
                Segment::Literal("ABCDEFGHIJ} "),
                Segment::Placeholder { raw: "${OK}", body: "OK" },
            ]
        );
    }

    #[test]
    fn empty_body_is_a_placeholder() {
        assert_eq!(scan("${}"), [Segment::Placeholder { raw: "${}", body: "" }]);
    }

    #[test]
    fn multibyte_text_round_trips() {
        let input = "héllo ${ünï} ✓ ${RANDOM_UUID";
        assert_eq!(concat(&scan(input)), input);
    }

    #[test]
    fn custom_delimiters() {
        let syntax = Syntax {
            start: "{{".to_string(),
            end: "}}".to_string(),
            escape: None,
            ..Syntax::default()
        };
        let segments: Vec<_> = Scanner::new("a {{X}} b", &syntax, 64).collect();
        assert_eq!(
            segments,
            [
                Segment::Literal("a "),
                Segment::Placeholder { raw: "{{X}}", body: "X" },
                Segment::Literal(" b"),
            ]
        );
    }

    #[test]
    fn empty_start_delimiter_scans_as_literal() {
        let syntax = Syntax {
            start: String::new(),
            ..Syntax::default()
        };
        let segments: Vec<_> = Scanner::new("a ${B} c", &syntax, 64).collect();
        assert_eq!(segments, [Segment::Literal("a ${B} c")]);
        assert!(!has_placeholders("a ${B} c", &syntax));
    }

    #[test]
    fn has_placeholders_checks_both_delimiters() {
        let syntax = Syntax::default();
        assert!(has_placeholders("Hello ${name}", &syntax));
        assert!(!has_placeholders("Hello world", &syntax));
        assert!(!has_placeholders("Cost: $100", &syntax));
        assert!(!has_placeholders("} then ${", &syntax));
    }
}
