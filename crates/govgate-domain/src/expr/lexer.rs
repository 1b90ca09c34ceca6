use super::ExprError;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    True,
    False,
    And,
    Or,
    Not,
    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LParen,
    RParen,
    Comma,
}

/// Tokenize an expression. Never panics; any unexpected byte is a parse error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '=' => {
                chars.next();
                match chars.peek() {
                    Some('=') => {
                        chars.next();
                        tokens.push(Token::EqEq);
                    }
                    _ => return Err(ExprError::Parse("'=' is not an operator; use '=='".into())),
                }
            }
            '!' => {
                chars.next();
                match chars.peek() {
                    Some('=') => {
                        chars.next();
                        tokens.push(Token::Ne);
                    }
                    _ => return Err(ExprError::Parse("'!' is not an operator; use 'not'".into())),
                }
            }
            '<' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Le);
                } else {
                    tokens.push(Token::Lt);
                }
            }
            '>' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Ge);
                } else {
                    tokens.push(Token::Gt);
                }
            }
            '\'' | '"' => {
                tokens.push(lex_string(&mut chars, false)?);
            }
            '-' | '0'..='9' => {
                tokens.push(lex_number(&mut chars)?);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let word = lex_word(&mut chars);
                // Raw string prefix: r'...' / r"..." (regex patterns).
                if word == "r"
                    && let Some(&q) = chars.peek()
                    && (q == '\'' || q == '"')
                {
                    tokens.push(lex_string(&mut chars, true)?);
                    continue;
                }
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    "true" | "True" => Token::True,
                    "false" | "False" => Token::False,
                    _ => Token::Ident(word),
                });
            }
            other => {
                return Err(ExprError::Parse(format!("unexpected character '{other}'")));
            }
        }
    }

    Ok(tokens)
}

fn lex_word(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }
    word
}

fn lex_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<Token, ExprError> {
    let mut text = String::new();
    if chars.peek() == Some(&'-') {
        text.push('-');
        chars.next();
        if !matches!(chars.peek(), Some('0'..='9')) {
            return Err(ExprError::Parse("'-' must be followed by a number".into()));
        }
    }
    let mut is_float = false;
    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' => {
                text.push(c);
                chars.next();
            }
            '.' if !is_float => {
                is_float = true;
                text.push(c);
                chars.next();
            }
            _ => break,
        }
    }
    if is_float {
        text.parse::<f64>()
            .map(Token::Float)
            .map_err(|_| ExprError::Parse(format!("invalid number '{text}'")))
    } else {
        text.parse::<i64>()
            .map(Token::Int)
            .map_err(|_| ExprError::Parse(format!("invalid number '{text}'")))
    }
}

fn lex_string(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    raw: bool,
) -> Result<Token, ExprError> {
    let quote = chars.next().unwrap_or('\'');
    let mut value = String::new();
    loop {
        match chars.next() {
            None => return Err(ExprError::Parse("unterminated string literal".into())),
            Some(c) if c == quote => break,
            Some('\\') if !raw => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('\\') => value.push('\\'),
                Some(c) if c == quote => value.push(c),
                Some(other) => {
                    return Err(ExprError::Parse(format!("unknown escape '\\{other}'")));
                }
                None => return Err(ExprError::Parse("unterminated string literal".into())),
            },
            // In raw strings a backslash is literal, but it still cannot escape
            // the closing quote (matches Python's r'...' behavior closely enough
            // for regex patterns).
            Some(c) => value.push(c),
        }
    }
    Ok(Token::Str(value))
}
