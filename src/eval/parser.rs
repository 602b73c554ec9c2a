use serde_json::Value;

use super::lexer::Token;
use super::EvalError;

// Caps on expression size. Parser recursion is bounded by the nesting cap;
// the token cap bounds operator-chain length, which in turn bounds recursion
// in the evaluator and in the boxed tree's drop.
pub(crate) const MAX_TOKENS: usize = 2048;
pub(crate) const MAX_NESTING: usize = 128;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "===",
            CmpOp::Ne => "!==",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

/// Parsed expression tree. `And`/`Or` are their own variants because they
/// short-circuit; comparisons share one evaluation path.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Value),
    Var(String),
    Defined(String),
    Not(Box<Expr>),
    Neg(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Cmp(CmpOp, Box<Expr>, Box<Expr>),
}

/// Parse a full token stream; trailing tokens are a syntax error. Streams
/// over `MAX_TOKENS` are rejected up front, nesting past `MAX_NESTING`
/// during the descent.
pub(crate) fn parse(tokens: &[Token]) -> Result<Expr, EvalError> {
    if tokens.len() > MAX_TOKENS {
        return Err(EvalError::ExpressionTooLong);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse_or()?;
    match parser.peek() {
        Some(extra) => Err(EvalError::UnexpectedToken(extra.describe())),
        None => Ok(expr),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        if self.depth == MAX_NESTING {
            return Err(EvalError::NestingTooDeep);
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_or(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_and()?;
        while self.eat(&Token::OrOr) {
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_equality()?;
        while self.eat(&Token::AndAnd) {
            let right = self.parse_equality()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEqEq) | Some(Token::EqEq) => CmpOp::Eq,
                Some(Token::BangEqEq) | Some(Token::BangEq) => CmpOp::Ne,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_relational()?;
            left = Expr::Cmp(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => CmpOp::Lt,
                Some(Token::Le) => CmpOp::Le,
                Some(Token::Gt) => CmpOp::Gt,
                Some(Token::Ge) => CmpOp::Ge,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Expr::Cmp(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        if self.eat(&Token::Bang) {
            self.enter()?;
            let inner = self.parse_unary();
            self.leave();
            return Ok(Expr::Not(Box::new(inner?)));
        }
        if self.eat(&Token::Minus) {
            self.enter()?;
            let inner = self.parse_unary();
            self.leave();
            return Ok(Expr::Neg(Box::new(inner?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        let token = match self.advance() {
            Some(tok) => tok.clone(),
            None => return Err(EvalError::UnexpectedEnd),
        };

        match token {
            Token::Number(n) => Ok(Expr::Literal(Value::from(n))),
            Token::Str(s) => Ok(Expr::Literal(Value::String(s))),
            Token::True => Ok(Expr::Literal(Value::Bool(true))),
            Token::False => Ok(Expr::Literal(Value::Bool(false))),
            Token::Null => Ok(Expr::Literal(Value::Null)),
            Token::Ident(name) => Ok(Expr::Var(name)),
            Token::Defined => {
                if !self.eat(&Token::LParen) {
                    return Err(self.unexpected_here());
                }
                let name = match self.advance() {
                    Some(Token::Ident(name)) => name.clone(),
                    Some(other) => return Err(EvalError::UnexpectedToken(other.describe())),
                    None => return Err(EvalError::UnexpectedEnd),
                };
                if !self.eat(&Token::RParen) {
                    return Err(self.unexpected_here());
                }
                Ok(Expr::Defined(name))
            }
            Token::LParen => {
                self.enter()?;
                let inner = self.parse_or();
                self.leave();
                let inner = inner?;
                if !self.eat(&Token::RParen) {
                    return Err(self.unexpected_here());
                }
                Ok(inner)
            }
            other => Err(EvalError::UnexpectedToken(other.describe())),
        }
    }

    fn unexpected_here(&self) -> EvalError {
        match self.peek() {
            Some(tok) => EvalError::UnexpectedToken(tok.describe()),
            None => EvalError::UnexpectedEnd,
        }
    }
}
