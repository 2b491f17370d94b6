use crate::{
    ast::{BinaryOp, Expr, ExprKind, Literal, Node, UnaryOp},
    diagnostics::Diagnostic,
    lexer::{Keyword, Lexer, Token, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Full,
    /// Assignments are rejected, so input can never change the session.
    Const,
}

const MAX_NESTING: usize = 128;

pub fn parse_node(source: &str, mode: ParseMode) -> Result<Node, Diagnostic> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens, mode).parse_node()
}

struct Parser {
    tokens: Vec<Token>,
    current: usize,
    mode: ParseMode,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, mode: ParseMode) -> Self {
        Self {
            tokens,
            current: 0,
            mode,
            depth: 0,
        }
    }

    fn parse_node(&mut self) -> Result<Node, Diagnostic> {
        let mut items = Vec::new();
        while self.matches(TokenKind::Semicolon) {}
        while !self.is_at_end() {
            items.push(self.parse_expression()?);
            while self.matches(TokenKind::Semicolon) {}
        }
        Ok(Node { items })
    }

    fn parse_expression(&mut self) -> Result<Expr, Diagnostic> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, Diagnostic> {
        let expr = self.parse_or()?;
        if !self.matches(TokenKind::Assign) {
            return Ok(expr);
        }
        let equals = self.previous().span;
        if self.mode == ParseMode::Const {
            return Err(
                Diagnostic::parser("assignment is not allowed in constant mode")
                    .with_span(equals),
            );
        }
        let value = self.nested(Self::parse_assignment)?;
        match expr.kind {
            ExprKind::Variable(name) => Ok(Expr {
                span: expr.span.to(value.span),
                kind: ExprKind::Assign {
                    name,
                    value: Box::new(value),
                },
            }),
            _ => Err(Diagnostic::parser("invalid assignment target").with_span(equals)),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, Diagnostic> {
        let depth = self.depth;
        let mut expr = self.parse_and()?;
        while self.matches(TokenKind::DoublePipe) {
            self.enter()?;
            let right = self.parse_and()?;
            expr = binary(BinaryOp::Or, expr, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Expr, Diagnostic> {
        let depth = self.depth;
        let mut expr = self.parse_equality()?;
        while self.matches(TokenKind::DoubleAmpersand) {
            self.enter()?;
            let right = self.parse_equality()?;
            expr = binary(BinaryOp::And, expr, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expr, Diagnostic> {
        let depth = self.depth;
        let mut expr = self.parse_comparison()?;
        while let Some(op) = if self.matches(TokenKind::EqualEqual) {
            Some(BinaryOp::Equal)
        } else if self.matches(TokenKind::BangEqual) {
            Some(BinaryOp::NotEqual)
        } else {
            None
        } {
            self.enter()?;
            let right = self.parse_comparison()?;
            expr = binary(op, expr, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expr, Diagnostic> {
        let depth = self.depth;
        let mut expr = self.parse_term()?;
        while let Some(op) = if self.matches(TokenKind::LessEqual) {
            Some(BinaryOp::LessEqual)
        } else if self.matches(TokenKind::GreaterEqual) {
            Some(BinaryOp::GreaterEqual)
        } else if self.matches(TokenKind::Less) {
            Some(BinaryOp::Less)
        } else if self.matches(TokenKind::Greater) {
            Some(BinaryOp::Greater)
        } else {
            None
        } {
            self.enter()?;
            let right = self.parse_term()?;
            expr = binary(op, expr, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr, Diagnostic> {
        let depth = self.depth;
        let mut expr = self.parse_factor()?;
        while let Some(op) = if self.matches(TokenKind::Plus) {
            Some(BinaryOp::Add)
        } else if self.matches(TokenKind::Minus) {
            Some(BinaryOp::Sub)
        } else {
            None
        } {
            self.enter()?;
            let right = self.parse_factor()?;
            expr = binary(op, expr, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expr, Diagnostic> {
        let depth = self.depth;
        let mut expr = self.parse_unary()?;
        while let Some(op) = if self.matches(TokenKind::Star) {
            Some(BinaryOp::Mul)
        } else if self.matches(TokenKind::Slash) {
            Some(BinaryOp::Div)
        } else if self.matches(TokenKind::Percent) {
            Some(BinaryOp::Mod)
        } else {
            None
        } {
            self.enter()?;
            let right = self.parse_unary()?;
            expr = binary(op, expr, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, Diagnostic> {
        let op = if self.matches(TokenKind::Minus) {
            UnaryOp::Negate
        } else if self.matches(TokenKind::Bang) {
            UnaryOp::Not
        } else {
            return self.parse_power();
        };
        let operator = self.previous().span;
        let right = self.nested(Self::parse_unary)?;
        Ok(Expr {
            span: operator.to(right.span),
            kind: ExprKind::Unary {
                op,
                expr: Box::new(right),
            },
        })
    }

    // `-2 ^ 2` is `-(2 ^ 2)`, and `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
    fn parse_power(&mut self) -> Result<Expr, Diagnostic> {
        let base = self.parse_call()?;
        if self.matches(TokenKind::Caret) {
            let exponent = self.nested(Self::parse_unary)?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_call(&mut self) -> Result<Expr, Diagnostic> {
        let depth = self.depth;
        let mut expr = self.parse_primary()?;
        loop {
            if self.matches(TokenKind::LParen) {
                self.enter()?;
                let args = self.parse_list(TokenKind::RParen)?;
                let paren = self.consume(TokenKind::RParen, "expected `)` after arguments")?;
                expr = Expr {
                    span: expr.span.to(paren.span),
                    kind: ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    },
                };
            } else if self.matches(TokenKind::LBracket) {
                self.enter()?;
                let index = self.parse_expression()?;
                let bracket = self.consume(TokenKind::RBracket, "expected `]` after index")?;
                expr = Expr {
                    span: expr.span.to(bracket.span),
                    kind: ExprKind::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    },
                };
            } else {
                break;
            }
        }
        self.depth = depth;
        Ok(expr)
    }

    fn parse_list(&mut self, terminator: TokenKind) -> Result<Vec<Expr>, Diagnostic> {
        let mut items = Vec::new();
        if !self.check(&terminator) {
            loop {
                items.push(self.parse_expression()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(items)
    }

    fn parse_primary(&mut self) -> Result<Expr, Diagnostic> {
        let token = self.peek().clone();
        let literal = match &token.kind {
            TokenKind::Keyword(Keyword::True) => Literal::Bool(true),
            TokenKind::Keyword(Keyword::False) => Literal::Bool(false),
            TokenKind::Keyword(Keyword::None) => Literal::None,
            TokenKind::Number => number_literal(&token)?,
            TokenKind::String => Literal::String(token.lexeme.clone()),
            TokenKind::Identifier => {
                self.advance();
                return Ok(Expr {
                    span: token.span,
                    kind: ExprKind::Variable(token.lexeme),
                });
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.nested(Self::parse_expression)?;
                self.consume(TokenKind::RParen, "expected `)` after expression")?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                self.advance();
                let elements = self.nested(|parser| parser.parse_list(TokenKind::RBracket))?;
                let rbracket =
                    self.consume(TokenKind::RBracket, "expected `]` after array literal")?;
                return Ok(Expr {
                    span: token.span.to(rbracket.span),
                    kind: ExprKind::ArrayLiteral(elements),
                });
            }
            TokenKind::Eof => return Err(self.error(&token, "unexpected end of expression")),
            _ => {
                return Err(self.error(
                    &token,
                    &format!("unexpected token `{}` in expression", token.lexeme),
                ));
            }
        };
        self.advance();
        Ok(Expr {
            span: token.span,
            kind: ExprKind::Literal(literal),
        })
    }

    // Every level of operator or bracket nesting goes through here, which
    // bounds both parser recursion and the depth of the resulting tree.
    fn enter(&mut self) -> Result<(), Diagnostic> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(self.peek(), "expression nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, Diagnostic>,
    ) -> Result<T, Diagnostic> {
        self.enter()?;
        let result = parse(self)?;
        self.depth -= 1;
        Ok(result)
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(&kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, Diagnostic> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error(self.peek(), message))
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().kind == *kind
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous().clone()
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    // The lexer always terminates the stream with `Eof`, and `advance`
    // never moves past it.
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn error(&self, token: &Token, message: &str) -> Diagnostic {
        Diagnostic::parser(message).with_span(token.span)
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr {
        span: left.span.to(right.span),
        kind: ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
    }
}

fn number_literal(token: &Token) -> Result<Literal, Diagnostic> {
    let digits = token.lexeme.replace('_', "");
    let literal = if digits.contains(['.', 'e', 'E']) {
        digits.parse().map(Literal::Float).ok()
    } else {
        digits.parse().map(Literal::Int).ok()
    };
    literal.ok_or_else(|| {
        Diagnostic::parser(format!("invalid number literal `{}`", token.lexeme))
            .with_span(token.span)
    })
}
