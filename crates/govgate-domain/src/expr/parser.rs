//! Recursive-descent parser for the rule-expression grammar.
//!
//! ```text
//! expr       := or_expr
//! or_expr    := and_expr ( "or" and_expr )*
//! and_expr   := not_expr ( "and" not_expr )*
//! not_expr   := "not" not_expr | comparison
//! comparison := operand ( ("==" | "!=" | "<" | "<=" | ">" | ">=") operand )?
//! operand    := literal | identifier | builtin "(" args ")" | "(" expr ")"
//! ```

use super::ast::{BinOp, Builtin, Expr, Literal};
use super::lexer::{tokenize, Token};
use super::ExprError;

/// Nesting cap. The grammar has no loops or recursion, so this only bounds
/// pathological parenthesis towers.
const MAX_DEPTH: u32 = 64;

/// Parse an expression string into a typed AST. Never panics.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::Parse("empty expression".into()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.or_expr(0)?;
    if let Some(tok) = parser.peek() {
        return Err(ExprError::Parse(format!(
            "unexpected trailing token {tok:?}"
        )));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), ExprError> {
        match self.next() {
            Some(ref tok) if tok == expected => Ok(()),
            Some(tok) => Err(ExprError::Parse(format!(
                "expected {what}, found {tok:?}"
            ))),
            None => Err(ExprError::Parse(format!(
                "expected {what}, found end of expression"
            ))),
        }
    }

    fn or_expr(&mut self, depth: u32) -> Result<Expr, ExprError> {
        if depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        let mut lhs = self.and_expr(depth)?;
        while self.peek() == Some(&Token::Or) {
            self.next();
            let rhs = self.and_expr(depth)?;
            lhs = Expr::Binary {
                op: BinOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn and_expr(&mut self, depth: u32) -> Result<Expr, ExprError> {
        let mut lhs = self.not_expr(depth)?;
        while self.peek() == Some(&Token::And) {
            self.next();
            let rhs = self.not_expr(depth)?;
            lhs = Expr::Binary {
                op: BinOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn not_expr(&mut self, depth: u32) -> Result<Expr, ExprError> {
        if depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        if self.peek() == Some(&Token::Not) {
            self.next();
            let inner = self.not_expr(depth + 1)?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.comparison(depth)
    }

    fn comparison(&mut self, depth: u32) -> Result<Expr, ExprError> {
        let lhs = self.operand(depth)?;
        let op = match self.peek() {
            Some(Token::EqEq) => BinOp::Eq,
            Some(Token::Ne) => BinOp::Ne,
            Some(Token::Lt) => BinOp::Lt,
            Some(Token::Le) => BinOp::Le,
            Some(Token::Gt) => BinOp::Gt,
            Some(Token::Ge) => BinOp::Ge,
            _ => return Ok(lhs),
        };
        self.next();
        let rhs = self.operand(depth)?;
        // Chained comparisons (a < b < c) are not part of the grammar; catching
        // them here gives a clearer error than "unexpected trailing token".
        if matches!(
            self.peek(),
            Some(Token::EqEq | Token::Ne | Token::Lt | Token::Le | Token::Gt | Token::Ge)
        ) {
            return Err(ExprError::Parse(
                "chained comparisons are not supported; use 'and'".into(),
            ));
        }
        Ok(Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn operand(&mut self, depth: u32) -> Result<Expr, ExprError> {
        if depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        match self.next() {
            Some(Token::Int(n)) => Ok(Expr::Literal(Literal::Int(n))),
            Some(Token::Float(f)) => Ok(Expr::Literal(Literal::Float(f))),
            Some(Token::Str(s)) => Ok(Expr::Literal(Literal::Str(s))),
            Some(Token::True) => Ok(Expr::Literal(Literal::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(Literal::Bool(false))),
            Some(Token::LParen) => {
                let inner = self.or_expr(depth + 1)?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    let Some(func) = Builtin::from_name(&name) else {
                        return Err(ExprError::UnknownFunction(name));
                    };
                    self.next();
                    let args = self.call_args(depth + 1)?;
                    if args.len() != func.arity() {
                        return Err(ExprError::Arity {
                            func: func.name(),
                            expected: func.arity(),
                            got: args.len(),
                        });
                    }
                    Ok(Expr::Call { func, args })
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            Some(tok) => Err(ExprError::Parse(format!("unexpected token {tok:?}"))),
            None => Err(ExprError::Parse("unexpected end of expression".into())),
        }
    }

    fn call_args(&mut self, depth: u32) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.next();
            return Ok(args);
        }
        loop {
            args.push(self.or_expr(depth)?);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => break,
                Some(tok) => {
                    return Err(ExprError::Parse(format!(
                        "expected ',' or ')' in argument list, found {tok:?}"
                    )));
                }
                None => {
                    return Err(ExprError::Parse(
                        "unterminated argument list".into(),
                    ));
                }
            }
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_simple_comparison() {
        let expr = parse("value > 0").expect("parse");
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinOp::Gt,
                lhs: Box::new(Expr::Ident("value".into())),
                rhs: Box::new(Expr::Literal(Literal::Int(0))),
            }
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        // a or b and c => a or (b and c)
        let expr = parse("a == 1 or b == 2 and c == 3").expect("parse");
        let Expr::Binary { op: BinOp::Or, rhs, .. } = expr else {
            panic!("expected top-level or");
        };
        assert!(matches!(*rhs, Expr::Binary { op: BinOp::And, .. }));
    }

    #[test]
    fn not_applies_to_comparison() {
        let expr = parse("not value > 0").expect("parse");
        assert!(matches!(expr, Expr::Not(_)));
    }

    #[test]
    fn parses_builtin_call_with_raw_string() {
        let expr = parse("regex_match(r'^[A-Z]{4}[0-9]{7}$', value)").expect("parse");
        let Expr::Call { func, args } = expr else {
            panic!("expected call");
        };
        assert_eq!(func, Builtin::RegexMatch);
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn parses_zero_arg_builtin() {
        let expr = parse("parse_date(value) <= today()").expect("parse");
        assert!(matches!(expr, Expr::Binary { op: BinOp::Le, .. }));
    }

    #[test]
    fn rejects_unknown_function() {
        assert_eq!(
            parse("exec('rm -rf /')"),
            Err(ExprError::UnknownFunction("exec".into()))
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(matches!(
            parse("len(a, b)"),
            Err(ExprError::Arity { func: "len", expected: 1, got: 2 })
        ));
    }

    #[test]
    fn rejects_chained_comparison() {
        assert!(parse("0 <= value <= 100").is_err());
    }

    #[test]
    fn rejects_trailing_garbage_and_empty_input() {
        assert!(parse("value > 0 value").is_err());
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn rejects_pathological_nesting() {
        let towers = "(".repeat(500) + "1" + &")".repeat(500);
        assert_eq!(parse(&towers), Err(ExprError::TooDeep));
    }

    proptest! {
        #[test]
        fn parser_never_panics(input in ".*") {
            let _ = parse(&input);
        }

        #[test]
        fn parser_never_panics_on_exprish_input(
            input in "[a-z_0-9<>=!()',. ]{0,80}"
        ) {
            let _ = parse(&input);
        }
    }
}
