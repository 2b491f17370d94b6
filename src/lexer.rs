use crate::diagnostics::{Diagnostic, DiagnosticKind, SourceSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    True,
    False,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    Keyword(Keyword),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    DoubleAmpersand,
    DoublePipe,
    Bang,
    BangEqual,
    EqualEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Unknown,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: SourceSpan,
}

pub struct Lexer<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    current: usize,
    peeked: Option<(usize, char)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices(),
            current: 0,
            peeked: None,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.peeked.take().or_else(|| self.chars.next());
        if let Some((idx, ch)) = next {
            self.current = idx + ch.len_utf8();
        }
        next
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        if self.peeked.is_none() {
            self.peeked = self.chars.next();
        }
        self.peeked
    }

    fn peek_second(&mut self) -> Option<char> {
        self.peek()?;
        self.chars.clone().next().map(|(_, ch)| ch)
    }

    fn match_next(&mut self, expected: char) -> bool {
        match self.peek() {
            Some((_, ch)) if ch == expected => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), Diagnostic> {
        loop {
            match self.peek() {
                Some((_, ch)) if ch.is_whitespace() => {
                    self.bump();
                }
                Some((_, '/')) if self.peek_second() == Some('/') => {
                    while let Some((_, ch)) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some((start, '/')) if self.peek_second() == Some('*') => {
                    self.bump();
                    self.bump();
                    self.block_comment(start)?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn block_comment(&mut self, start: usize) -> Result<(), Diagnostic> {
        let mut depth = 1;
        while let Some((_, ch)) = self.bump() {
            if ch == '/' && self.match_next('*') {
                depth += 1;
            } else if ch == '*' && self.match_next('/') {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
        Err(
            Diagnostic::new(DiagnosticKind::Lexer, "unterminated block comment")
                .with_span(SourceSpan::new(start, self.current)),
        )
    }

    fn identifier_or_keyword(&mut self, start: usize) -> Token {
        while let Some((_, ch)) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let lexeme = self.source[start..self.current].to_string();
        let kind = keyword_for(&lexeme).unwrap_or(TokenKind::Identifier);
        Token {
            kind,
            lexeme,
            span: SourceSpan::new(start, self.current),
        }
    }

    fn number_literal(&mut self, start: usize) -> Token {
        let mut seen_dot = false;
        let mut seen_exp = false;
        while let Some((_, ch)) = self.peek() {
            match ch {
                '0'..='9' | '_' => {
                    self.bump();
                }
                '.' if !seen_dot && !seen_exp => {
                    // `1.` followed by a non-digit stays an integer.
                    if !self.peek_second().is_some_and(|next| next.is_ascii_digit()) {
                        break;
                    }
                    seen_dot = true;
                    self.bump();
                }
                'e' | 'E' if !seen_exp => {
                    seen_exp = true;
                    self.bump();
                    if let Some((_, '+' | '-')) = self.peek() {
                        self.bump();
                    }
                }
                _ => break,
            }
        }
        Token {
            kind: TokenKind::Number,
            lexeme: self.source[start..self.current].to_string(),
            span: SourceSpan::new(start, self.current),
        }
    }

    fn string_literal(&mut self, start: usize) -> Result<Token, Diagnostic> {
        let mut value = String::new();
        while let Some((_, ch)) = self.bump() {
            match ch {
                '"' => {
                    return Ok(Token {
                        kind: TokenKind::String,
                        lexeme: value,
                        span: SourceSpan::new(start, self.current),
                    });
                }
                '\\' => match self.bump() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, other)) => value.push(other),
                    None => break,
                },
                _ => value.push(ch),
            }
        }
        Err(
            Diagnostic::new(DiagnosticKind::Lexer, "unterminated string literal")
                .with_span(SourceSpan::new(start, self.current)),
        )
    }

    fn simple_token(&self, start: usize, kind: TokenKind) -> Token {
        Token {
            kind,
            lexeme: self.source[start..self.current].to_string(),
            span: SourceSpan::new(start, self.current),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let Some((start, ch)) = self.bump() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    lexeme: String::new(),
                    span: SourceSpan::new(self.current, self.current),
                });
                break;
            };

            let token = match ch {
                c if c.is_alphabetic() || c == '_' => self.identifier_or_keyword(start),
                '0'..='9' => self.number_literal(start),
                '"' => self.string_literal(start)?,
                '(' => self.simple_token(start, TokenKind::LParen),
                ')' => self.simple_token(start, TokenKind::RParen),
                '[' => self.simple_token(start, TokenKind::LBracket),
                ']' => self.simple_token(start, TokenKind::RBracket),
                ',' => self.simple_token(start, TokenKind::Comma),
                ';' => self.simple_token(start, TokenKind::Semicolon),
                '+' => self.simple_token(start, TokenKind::Plus),
                '-' => self.simple_token(start, TokenKind::Minus),
                '*' => self.simple_token(start, TokenKind::Star),
                '/' => self.simple_token(start, TokenKind::Slash),
                '%' => self.simple_token(start, TokenKind::Percent),
                '^' => self.simple_token(start, TokenKind::Caret),
                '=' => {
                    if self.match_next('=') {
                        self.simple_token(start, TokenKind::EqualEqual)
                    } else {
                        self.simple_token(start, TokenKind::Assign)
                    }
                }
                '!' => {
                    if self.match_next('=') {
                        self.simple_token(start, TokenKind::BangEqual)
                    } else {
                        self.simple_token(start, TokenKind::Bang)
                    }
                }
                '&' if self.match_next('&') => {
                    self.simple_token(start, TokenKind::DoubleAmpersand)
                }
                '|' if self.match_next('|') => self.simple_token(start, TokenKind::DoublePipe),
                '<' => {
                    if self.match_next('=') {
                        self.simple_token(start, TokenKind::LessEqual)
                    } else {
                        self.simple_token(start, TokenKind::Less)
                    }
                }
                '>' => {
                    if self.match_next('=') {
                        self.simple_token(start, TokenKind::GreaterEqual)
                    } else {
                        self.simple_token(start, TokenKind::Greater)
                    }
                }
                _ => self.simple_token(start, TokenKind::Unknown),
            };
            tokens.push(token);
        }
        Ok(tokens)
    }
}

fn keyword_for(ident: &str) -> Option<TokenKind> {
    let keyword = match ident {
        "true" => Keyword::True,
        "false" => Keyword::False,
        "none" => Keyword::None,
        _ => return None,
    };
    Some(TokenKind::Keyword(keyword))
}
