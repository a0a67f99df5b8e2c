//! Token definitions for lexicon files
//!
//! A lexicon file is line oriented. Each line is a list of whitespace
//! separated words, optionally led by a `!` section flag and followed by a
//! `#` comment. Comments are recognized as tokens so the line grouping can
//! drop them.

use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\f]+")]
pub enum LexiconToken {
    /// `!LEXICAL`, or a bare `!` when the name follows as a separate word
    #[regex(r"![^\s#]*", |lex| lex.slice()[1..].to_string())]
    Flag(String),

    #[regex(r"#[^\n]*")]
    Comment,

    #[token("\n")]
    Newline,

    #[regex(r"[^\s#!][^\s#]*", |lex| lex.slice().to_string())]
    Word(String),
}

/// One non-blank line: its 1-based number and its tokens, comments removed
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub tokens: Vec<LexiconToken>,
}

/// Tokenize a lexicon source and group the tokens by line.
///
/// Blank and comment-only lines are dropped. Characters logos cannot place
/// are skipped.
pub fn tokenize_lines(source: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line {
        number: 1,
        tokens: Vec::new(),
    };

    for token in LexiconToken::lexer(source).filter_map(|result| result.ok()) {
        match token {
            LexiconToken::Comment => {}
            LexiconToken::Newline => {
                let number = current.number + 1;
                let finished = std::mem::replace(
                    &mut current,
                    Line {
                        number,
                        tokens: Vec::new(),
                    },
                );
                if !finished.tokens.is_empty() {
                    lines.push(finished);
                }
            }
            other => current.tokens.push(other),
        }
    }
    if !current.tokens.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<LexiconToken> {
        LexiconToken::lexer(source)
            .filter_map(|result| result.ok())
            .collect()
    }

    #[test]
    fn test_flag_forms() {
        assert_eq!(tokens("!LEXICAL"), vec![LexiconToken::Flag("LEXICAL".into())]);
        assert_eq!(
            tokens("! GOALS"),
            vec![LexiconToken::Flag(String::new()), LexiconToken::Word("GOALS".into())]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            tokens("eats v =d # transitive\nmary"),
            vec![
                LexiconToken::Word("eats".into()),
                LexiconToken::Word("v".into()),
                LexiconToken::Word("=d".into()),
                LexiconToken::Comment,
                LexiconToken::Newline,
                LexiconToken::Word("mary".into()),
            ]
        );
    }

    #[test]
    fn test_comment_glued_to_word() {
        assert_eq!(
            tokens("d#note"),
            vec![LexiconToken::Word("d".into()), LexiconToken::Comment]
        );
    }

    #[test]
    fn test_lines_skip_blank_and_comment_lines() {
        let lines = tokenize_lines("# header\n\nmary d\n   \n! GOALS\nc");
        let numbers: Vec<usize> = lines.iter().map(|line| line.number).collect();
        assert_eq!(numbers, vec![3, 5, 6]);
        assert_eq!(lines[0].tokens.len(), 2);
    }
}
