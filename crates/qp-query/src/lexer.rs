//! Query lexer (tokenizer).
//!
//! Splits a plain-English query into classified tokens. Words are separated by spaces unless
//! they sit inside a `"` or `'` quoted span; every flushed word is stripped of punctuation
//! before it is classified.

use std::fmt;

use serde::Serialize;

/// A boolean operator keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// The `and` keyword (also inserted implicitly between adjacent terms).
    And,
    /// The `or` keyword.
    Or,
    /// The `not` keyword.
    Not,
}

impl Operator {
    /// Returns the lower-case keyword for this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// A searchable word or quoted phrase.
    Term,
    /// Opening parenthesis.
    Open,
    /// Closing parenthesis.
    Close,
    /// An operator keyword.
    Op(Operator),
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The classification, derived once from the lower-cased text.
    pub kind: TokenKind,
    /// Original text for terms, lower-cased keyword for operators.
    pub text: String,
    /// Byte offset in the input where the token started.
    pub position: usize,
}

impl Token {
    /// Creates a token, classifying it from its text.
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        let text = text.into();
        let lowered = text.to_lowercase();
        let kind = match lowered.as_str() {
            "(" => TokenKind::Open,
            ")" => TokenKind::Close,
            "and" => TokenKind::Op(Operator::And),
            "or" => TokenKind::Op(Operator::Or),
            "not" => TokenKind::Op(Operator::Not),
            _ => TokenKind::Term,
        };
        let text = if matches!(kind, TokenKind::Op(_)) {
            lowered
        } else {
            text
        };
        Self {
            kind,
            text,
            position,
        }
    }

    /// Creates an operator token that was not typed by the user.
    pub(crate) fn operator(op: Operator, position: usize) -> Self {
        Self {
            kind: TokenKind::Op(op),
            text: op.keyword().to_string(),
            position,
        }
    }

    /// Whether this token can end an operand (a term or a closing parenthesis).
    pub(crate) fn closes_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Term | TokenKind::Close)
    }

    /// Whether this token can begin an operand (a term, an opening parenthesis or `not`).
    pub(crate) fn opens_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Term | TokenKind::Open | TokenKind::Op(Operator::Not)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TokenKind::Term => "term",
            TokenKind::Open => "open",
            TokenKind::Close => "close",
            TokenKind::Op(_) => "op",
        };
        write!(f, "{kind}:{}", self.text)
    }
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Tokens produced so far.
    tokens: Vec<Token>,
    /// Characters of the token being accumulated.
    buffer: String,
    /// Byte position where the buffer started.
    start: usize,
    /// The quote character of the currently open quoted span.
    quote: Option<char>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: Vec::new(),
            buffer: String::new(),
            start: 0,
            quote: None,
        }
    }

    /// Tokenizes the entire input.
    fn tokenize(mut self) -> Vec<Token> {
        for (position, ch) in self.input.char_indices() {
            match self.quote {
                None if ch == '"' || ch == '\'' => {
                    self.flush();
                    self.quote = Some(ch);
                    self.push(ch, position);
                }
                None if ch == ' ' => self.flush(),
                Some(quote) if quote == ch => {
                    self.push(ch, position);
                    self.flush();
                    self.quote = None;
                }
                _ => self.push(ch, position),
            }
        }

        // An unmatched quote swallows the rest of the input into one token
        self.flush();
        self.tokens
    }

    /// Appends a character to the buffer, remembering where the buffer began.
    fn push(&mut self, ch: char, position: usize) {
        if self.buffer.is_empty() {
            self.start = position;
        }
        self.buffer.push(ch);
    }

    /// Emits the buffer as a token unless it strips down to nothing.
    fn flush(&mut self) {
        let text = strip_punctuation(&self.buffer);
        self.buffer.clear();
        if !text.is_empty() {
            self.tokens.push(Token::new(text, self.start));
        }
    }
}

/// Removes everything except alphanumerics and parentheses from a raw token.
///
/// Runs of whitespace collapse to a single space and the result is trimmed. A raw token that
/// starts and ends with the same quote character is re-wrapped in double quotes, whichever
/// quote character it originally used, so a quoted span with no content left becomes `""`.
pub fn strip_punctuation(raw: &str) -> String {
    let (Some(first), Some(last)) = (raw.chars().next(), raw.chars().next_back()) else {
        return String::new();
    };
    let quoted = (first == '"' || first == '\'') && first == last;

    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '(' || c == ')' {
                c
            } else {
                ' '
            }
        })
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if quoted {
        format!("\"{collapsed}\"")
    } else {
        collapsed
    }
}

/// Splits a query string into tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

/// Re-tokenizes terms that carry parentheses, e.g. `apple()` or `(banana`.
///
/// Parentheses survive punctuation stripping, so a term typed without surrounding spaces still
/// holds them. Each such term is padded around its parentheses and tokenized again in place.
/// Sub-tokens inherit the position of the term they replace.
pub fn expand(tokens: Vec<Token>) -> Vec<Token> {
    let mut expanded = Vec::with_capacity(tokens.len());

    for token in tokens {
        if token.kind == TokenKind::Term && token.text.contains(['(', ')']) {
            let padded = token.text.replace('(', " ( ").replace(')', " ) ");
            expanded.extend(tokenize(&padded).into_iter().map(|sub| Token {
                position: token.position,
                ..sub
            }));
        } else {
            expanded.push(token);
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(tokenize("   "), vec![]);
    }

    #[test]
    fn plain_term() {
        let token = Token::new("fred", 0);
        assert_eq!(token.kind, TokenKind::Term);
        assert_eq!(token.to_string(), "term:fred");
    }

    #[test]
    fn parentheses_classified() {
        assert_eq!(Token::new("(", 0).kind, TokenKind::Open);
        assert_eq!(Token::new(")", 0).kind, TokenKind::Close);
    }

    #[test]
    fn operators_case_insensitive() {
        let and = Token::new("AND", 0);
        assert_eq!(and.kind, TokenKind::Op(Operator::And));
        assert_eq!(and.text, "and");
        assert_eq!(Token::new("Or", 0).kind, TokenKind::Op(Operator::Or));
        assert_eq!(Token::new("not", 0).to_string(), "op:not");
    }

    #[test]
    fn quoted_keyword_is_a_term() {
        let token = Token::new("\"and\"", 0);
        assert_eq!(token.kind, TokenKind::Term);
        assert_eq!(token.text, "\"and\"");
    }

    #[test]
    fn term_case_preserved() {
        assert_eq!(Token::new("FreD", 0).text, "FreD");
    }

    #[test]
    fn multiple_terms_with_positions() {
        let tokens = tokenize("apple  banana");
        assert_eq!(texts(&tokens), vec!["term:apple", "term:banana"]);
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 7);
    }

    #[test]
    fn keywords_recognised() {
        assert_eq!(
            texts(&tokenize("apple NOT banana Or cherry")),
            vec![
                "term:apple",
                "op:not",
                "term:banana",
                "op:or",
                "term:cherry"
            ]
        );
    }

    #[test]
    fn double_quoted_phrase() {
        assert_eq!(
            texts(&tokenize("\"apple banana\"")),
            vec!["term:\"apple banana\""]
        );
    }

    #[test]
    fn single_quotes_normalised() {
        assert_eq!(
            texts(&tokenize("'apple banana'")),
            vec!["term:\"apple banana\""]
        );
    }

    #[test]
    fn embedded_quotes_stripped() {
        assert_eq!(
            texts(&tokenize("'apple \"and\" banana'")),
            vec!["term:\"apple and banana\""]
        );
    }

    #[test]
    fn quote_flushes_preceding_word() {
        assert_eq!(
            texts(&tokenize("fig\"apple pie\"cherry")),
            vec!["term:fig", "term:\"apple pie\"", "term:cherry"]
        );
    }

    #[test]
    fn unclosed_quote_swallows_rest() {
        let tokens = tokenize("apple \"banana and cherry");
        assert_eq!(texts(&tokens), vec!["term:apple", "term:banana and cherry"]);
        assert_eq!(tokens[1].position, 6);
    }

    #[test]
    fn punctuation_removed() {
        assert_eq!(
            texts(&tokenize("$  %^%apple^   &$% *$%")),
            vec!["term:apple"]
        );
        assert_eq!(tokenize("$%^%^&$%*$%"), vec![]);
    }

    #[test]
    fn strip_punctuation_cases() {
        assert_eq!(strip_punctuation(""), "");
        assert_eq!(strip_punctuation("don't"), "don t");
        assert_eq!(strip_punctuation("apple()"), "apple()");
        assert_eq!(strip_punctuation("'a--b'"), "\"a b\"");
        assert_eq!(strip_punctuation("\"...\""), "\"\"");
        assert_eq!(strip_punctuation("'"), "\"\"");
        assert_eq!(strip_punctuation("\"apple"), "apple");
    }

    #[test]
    fn unicode_letters_kept() {
        assert_eq!(texts(&tokenize("café!")), vec!["term:café"]);
    }

    #[test]
    fn expand_splits_parentheses() {
        let tokens = expand(tokenize("apple() (banana)"));
        assert_eq!(
            texts(&tokens),
            vec![
                "term:apple",
                "open:(",
                "close:)",
                "open:(",
                "term:banana",
                "close:)"
            ]
        );
        assert!(tokens[..3].iter().all(|t| t.position == 0));
        assert!(tokens[3..].iter().all(|t| t.position == 8));
    }

    #[test]
    fn expand_classifies_inner_keywords() {
        assert_eq!(
            texts(&expand(tokenize("(apple(or)banana)"))),
            vec![
                "open:(",
                "term:apple",
                "open:(",
                "op:or",
                "close:)",
                "term:banana",
                "close:)"
            ]
        );
    }

    #[test]
    fn expand_leaves_plain_tokens() {
        let tokens = tokenize("apple and banana");
        assert_eq!(expand(tokens.clone()), tokens);
    }
}
