//! Restricted arithmetic evaluator.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?          right associative
//! primary := number | func '(' expr ')' | '(' expr ')'
//! func    := sqrt | sin | cos | tan
//! ```
//!
//! `**` is accepted as a spelling of `^`. Nothing outside this grammar is ever
//! executed.
//!
//! Input is capped at `MAX_TOKENS` tokens and `MAX_DEPTH` levels of nesting
//! (parentheses, calls, signs and exponents), which bounds the height of the
//! tree that `eval` and `Drop` walk.

use thiserror::Error;

pub const MAX_TOKENS: usize = 512;
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sqrt,
    Sin,
    Cos,
    Tan,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Func::Sqrt),
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            _ => None,
        }
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Func::Sqrt => x.sqrt(),
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    /// True for a plain number, optionally signed or parenthesized.
    /// Such input ("5pm", "(3)") carries no operation to perform.
    pub fn is_literal(&self) -> bool {
        match self {
            Expr::Number(_) => true,
            Expr::Neg(inner) => inner.is_literal(),
            _ => false,
        }
    }

    pub fn eval(&self) -> Result<f64, CalcError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Neg(inner) => -inner.eval()?,
            Expr::Call(func, arg) => func.apply(arg.eval()?),
            Expr::Binary(op, lhs, rhs) => {
                let a = lhs.eval()?;
                let b = rhs.eval()?;
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div | BinOp::Rem if b == 0.0 => {
                        return Err(CalcError::DivisionByZero)
                    }
                    BinOp::Div => a / b,
                    BinOp::Rem => a % b,
                    BinOp::Pow => a.powf(b),
                }
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFinite)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let n = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidExpression(format!("bad number '{}'", literal)))?;
                tokens.push(Token::Num(n));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                tokens.push(Token::Ident(ident.to_ascii_lowercase()));
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Caret);
                i += 2;
            }
            _ => {
                let tok = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '^' => Token::Caret,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    other => {
                        return Err(CalcError::InvalidExpression(format!(
                            "unexpected character '{}'",
                            other
                        )))
                    }
                };
                tokens.push(tok);
                i += 1;
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Runs `rule` one nesting level deeper.
    fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, CalcError>,
    ) -> Result<T, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::InvalidExpression(
                "expression nested too deeply".to_string(),
            ));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn expect(&mut self, want: Token) -> Result<(), CalcError> {
        match self.next() {
            Some(tok) if tok == want => Ok(()),
            Some(tok) => Err(CalcError::InvalidExpression(format!(
                "expected {:?}, found {:?}",
                want, tok
            ))),
            None => Err(CalcError::InvalidExpression(format!(
                "expected {:?}, found end of input",
                want
            ))),
        }
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Rem,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.nested(Self::unary)?)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            let exponent = self.nested(Self::unary)?;
            return Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        match self.next() {
            Some(Token::Num(n)) => Ok(Expr::Number(n)),
            Some(Token::LParen) => {
                let inner = self.nested(Self::expr)?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                let func = Func::from_name(&name).ok_or_else(|| {
                    CalcError::InvalidExpression(format!("unknown function '{}'", name))
                })?;
                self.expect(Token::LParen)?;
                let arg = self.nested(Self::expr)?;
                self.expect(Token::RParen)?;
                Ok(Expr::Call(func, Box::new(arg)))
            }
            Some(tok) => Err(CalcError::InvalidExpression(format!("unexpected {:?}", tok))),
            None => Err(CalcError::InvalidExpression("unexpected end of input".to_string())),
        }
    }
}

/// Parses `input` into an expression tree without evaluating it.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::InvalidExpression("empty expression".to_string()));
    }
    if tokens.len() > MAX_TOKENS {
        return Err(CalcError::InvalidExpression(format!(
            "expression longer than {} tokens",
            MAX_TOKENS
        )));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(CalcError::InvalidExpression(format!("trailing {:?}", tok)));
    }
    Ok(expr)
}

pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    parse(input)?.eval()
}
