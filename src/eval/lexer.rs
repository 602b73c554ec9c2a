use super::EvalError;

/// Token produced by the expression lexer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Null,
    Defined,
    AndAnd,
    OrOr,
    Bang,
    BangEq,
    BangEqEq,
    EqEq,
    EqEqEq,
    Lt,
    Le,
    Gt,
    Ge,
    Minus,
    LParen,
    RParen,
}

impl Token {
    /// Token text for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Str(s) => format!("\"{}\"", s),
            Token::Ident(name) => name.clone(),
            Token::True => "true".into(),
            Token::False => "false".into(),
            Token::Null => "null".into(),
            Token::Defined => "defined".into(),
            Token::AndAnd => "&&".into(),
            Token::OrOr => "||".into(),
            Token::Bang => "!".into(),
            Token::BangEq => "!=".into(),
            Token::BangEqEq => "!==".into(),
            Token::EqEq => "==".into(),
            Token::EqEqEq => "===".into(),
            Token::Lt => "<".into(),
            Token::Le => "<=".into(),
            Token::Gt => ">".into(),
            Token::Ge => ">=".into(),
            Token::Minus => "-".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_cont(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

pub(crate) fn tokenize(expr: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = expr.chars().collect();
    let len = chars.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < len {
        let ch = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        // Number: digits with an optional fraction
        if ch.is_ascii_digit() {
            let start = i;
            while i < len && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < len && chars[i] == '.' && i + 1 < len && chars[i + 1].is_ascii_digit() {
                i += 1;
                while i < len && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| EvalError::UnexpectedToken(text.clone()))?;
            tokens.push(Token::Number(value));
            continue;
        }

        // String literal, single or double quoted, backslash escapes
        if ch == '"' || ch == '\'' {
            let quote = ch;
            let mut text = String::new();
            let mut closed = false;
            i += 1;
            while i < len {
                let c = chars[i];
                if c == '\\' && i + 1 < len {
                    text.push(match chars[i + 1] {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                    i += 2;
                    continue;
                }
                if c == quote {
                    closed = true;
                    i += 1;
                    break;
                }
                text.push(c);
                i += 1;
            }
            if !closed {
                return Err(EvalError::UnterminatedString);
            }
            tokens.push(Token::Str(text));
            continue;
        }

        // Identifier or keyword
        if is_ident_start(ch) {
            let start = i;
            while i < len && is_ident_cont(chars[i]) {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();
            tokens.push(match ident.as_str() {
                "true" => Token::True,
                "false" => Token::False,
                "null" => Token::Null,
                "defined" => Token::Defined,
                _ => Token::Ident(ident),
            });
            continue;
        }

        // Operators, longest spelling first
        if ch == '=' && i + 2 < len && chars[i + 1] == '=' && chars[i + 2] == '=' {
            tokens.push(Token::EqEqEq);
            i += 3;
        } else if ch == '=' && i + 1 < len && chars[i + 1] == '=' {
            tokens.push(Token::EqEq);
            i += 2;
        } else if ch == '!' && i + 2 < len && chars[i + 1] == '=' && chars[i + 2] == '=' {
            tokens.push(Token::BangEqEq);
            i += 3;
        } else if ch == '!' && i + 1 < len && chars[i + 1] == '=' {
            tokens.push(Token::BangEq);
            i += 2;
        } else if ch == '!' {
            tokens.push(Token::Bang);
            i += 1;
        } else if ch == '&' && i + 1 < len && chars[i + 1] == '&' {
            tokens.push(Token::AndAnd);
            i += 2;
        } else if ch == '|' && i + 1 < len && chars[i + 1] == '|' {
            tokens.push(Token::OrOr);
            i += 2;
        } else if ch == '<' && i + 1 < len && chars[i + 1] == '=' {
            tokens.push(Token::Le);
            i += 2;
        } else if ch == '<' {
            tokens.push(Token::Lt);
            i += 1;
        } else if ch == '>' && i + 1 < len && chars[i + 1] == '=' {
            tokens.push(Token::Ge);
            i += 2;
        } else if ch == '>' {
            tokens.push(Token::Gt);
            i += 1;
        } else if ch == '-' {
            tokens.push(Token::Minus);
            i += 1;
        } else if ch == '(' {
            tokens.push(Token::LParen);
            i += 1;
        } else if ch == ')' {
            tokens.push(Token::RParen);
            i += 1;
        } else {
            return Err(EvalError::UnexpectedChar(ch));
        }
    }

    Ok(tokens)
}
