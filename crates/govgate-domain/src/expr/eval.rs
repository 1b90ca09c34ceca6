//! Tree-walking interpreter for the expression AST.
//!
//! Boolean connectives require boolean operands and the whole expression must
//! produce a boolean; host-language truthiness is deliberately not reproduced.

use super::ast::{BinOp, Builtin, Expr, Literal};
use super::parser::parse;
use super::ExprError;
use serde_json::{Map, Value};
use time::macros::format_description;
use time::Date;

/// Runtime value domain for expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(Date),
    List(Vec<ExprValue>),
}

impl ExprValue {
    fn type_name(&self) -> &'static str {
        match self {
            ExprValue::Null => "null",
            ExprValue::Bool(_) => "bool",
            ExprValue::Int(_) => "int",
            ExprValue::Float(_) => "float",
            ExprValue::Str(_) => "string",
            ExprValue::Date(_) => "date",
            ExprValue::List(_) => "list",
        }
    }

    fn from_json(value: &Value) -> Result<ExprValue, ExprError> {
        match value {
            Value::Null => Ok(ExprValue::Null),
            Value::Bool(b) => Ok(ExprValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ExprValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(ExprValue::Float(f))
                } else {
                    Err(ExprError::Type(format!("unrepresentable number {n}")))
                }
            }
            Value::String(s) => Ok(ExprValue::Str(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(ExprValue::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(ExprValue::List),
            Value::Object(_) => Err(ExprError::Type(
                "nested objects cannot be used in expressions".into(),
            )),
        }
    }

    /// Lenient string form for builtins that accept any scalar (`regex_match`,
    /// `parse_date`), mirroring the str() coercion rules the governed
    /// expressions were authored against.
    fn coerce_string(&self) -> Result<String, ExprError> {
        match self {
            ExprValue::Str(s) => Ok(s.clone()),
            ExprValue::Int(i) => Ok(i.to_string()),
            ExprValue::Float(f) => Ok(f.to_string()),
            ExprValue::Bool(b) => Ok(b.to_string()),
            other => Err(ExprError::Type(format!(
                "cannot treat {} as a string",
                other.type_name()
            ))),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            ExprValue::Int(i) => Some(*i as f64),
            ExprValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Parse and evaluate an expression against a payload binding map.
pub fn evaluate(
    input: &str,
    bindings: &Map<String, Value>,
    today: Date,
) -> Result<bool, ExprError> {
    let expr = parse(input)?;
    evaluate_parsed(&expr, bindings, today)
}

/// Evaluate an already parsed expression. The result must be boolean.
pub fn evaluate_parsed(
    expr: &Expr,
    bindings: &Map<String, Value>,
    today: Date,
) -> Result<bool, ExprError> {
    match eval(expr, bindings, today)? {
        ExprValue::Bool(b) => Ok(b),
        other => Err(ExprError::Type(format!(
            "expression produced {} instead of a boolean",
            other.type_name()
        ))),
    }
}

fn eval(expr: &Expr, bindings: &Map<String, Value>, today: Date) -> Result<ExprValue, ExprError> {
    match expr {
        Expr::Literal(lit) => Ok(match lit {
            Literal::Bool(b) => ExprValue::Bool(*b),
            Literal::Int(i) => ExprValue::Int(*i),
            Literal::Float(f) => ExprValue::Float(*f),
            Literal::Str(s) => ExprValue::Str(s.clone()),
        }),
        // An explicit payload key is required; there is no positional fallback.
        Expr::Ident(name) => match bindings.get(name) {
            Some(value) => ExprValue::from_json(value),
            None => Err(ExprError::UnknownIdentifier(name.clone())),
        },
        Expr::Not(inner) => match eval(inner, bindings, today)? {
            ExprValue::Bool(b) => Ok(ExprValue::Bool(!b)),
            other => Err(ExprError::Type(format!(
                "'not' requires a boolean, got {}",
                other.type_name()
            ))),
        },
        Expr::Binary { op, lhs, rhs } => {
            let l = eval(lhs, bindings, today)?;
            match op {
                BinOp::And | BinOp::Or => {
                    let l = require_bool(l, op)?;
                    // Both operands are always evaluated; no short-circuit.
                    let r = require_bool(eval(rhs, bindings, today)?, op)?;
                    Ok(ExprValue::Bool(match op {
                        BinOp::And => l && r,
                        _ => l || r,
                    }))
                }
                _ => {
                    let r = eval(rhs, bindings, today)?;
                    compare(*op, l, r).map(ExprValue::Bool)
                }
            }
        }
        Expr::Call { func, args } => call_builtin(*func, args, bindings, today),
    }
}

fn require_bool(value: ExprValue, op: &BinOp) -> Result<bool, ExprError> {
    match value {
        ExprValue::Bool(b) => Ok(b),
        other => Err(ExprError::Type(format!(
            "'{}' requires boolean operands, got {}",
            op.symbol(),
            other.type_name()
        ))),
    }
}

fn compare(op: BinOp, l: ExprValue, r: ExprValue) -> Result<bool, ExprError> {
    // Equality is total: distinct types are simply unequal (numeric types
    // compare by value across int/float).
    if matches!(op, BinOp::Eq | BinOp::Ne) {
        let equal = match (&l, &r) {
            (ExprValue::Int(_) | ExprValue::Float(_), ExprValue::Int(_) | ExprValue::Float(_)) => {
                l.as_f64() == r.as_f64()
            }
            _ => l == r,
        };
        return Ok(if op == BinOp::Eq { equal } else { !equal });
    }

    // Ordering is partial: only within comparable types.
    let ordering = match (&l, &r) {
        (ExprValue::Int(_) | ExprValue::Float(_), ExprValue::Int(_) | ExprValue::Float(_)) => {
            let (Some(a), Some(b)) = (l.as_f64(), r.as_f64()) else {
                return Err(ExprError::Type("non-finite number in comparison".into()));
            };
            a.partial_cmp(&b)
                .ok_or_else(|| ExprError::Type("non-finite number in comparison".into()))?
        }
        (ExprValue::Str(a), ExprValue::Str(b)) => a.cmp(b),
        (ExprValue::Date(a), ExprValue::Date(b)) => a.cmp(b),
        _ => {
            return Err(ExprError::Type(format!(
                "cannot order {} against {}",
                l.type_name(),
                r.type_name()
            )));
        }
    };

    Ok(match op {
        BinOp::Lt => ordering.is_lt(),
        BinOp::Le => ordering.is_le(),
        BinOp::Gt => ordering.is_gt(),
        BinOp::Ge => ordering.is_ge(),
        _ => unreachable!("equality handled above"),
    })
}

fn call_builtin(
    func: Builtin,
    args: &[Expr],
    bindings: &Map<String, Value>,
    today: Date,
) -> Result<ExprValue, ExprError> {
    let values: Vec<ExprValue> = args
        .iter()
        .map(|a| eval(a, bindings, today))
        .collect::<Result<_, _>>()?;

    match func {
        Builtin::RegexMatch => {
            let ExprValue::Str(pattern) = &values[0] else {
                return Err(ExprError::Type(
                    "regex_match pattern must be a string".into(),
                ));
            };
            let haystack = values[1].coerce_string()?;
            let re = regex::Regex::new(pattern).map_err(|e| ExprError::InvalidRegex {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            // Match must begin at the start of the value (re.match semantics,
            // not a substring search).
            let matched = re.find(&haystack).is_some_and(|m| m.start() == 0);
            Ok(ExprValue::Bool(matched))
        }
        Builtin::ParseDate => {
            let text = values[0].coerce_string()?;
            let prefix: String = text.chars().take(10).collect();
            let format = format_description!("[year]-[month]-[day]");
            Date::parse(&prefix, &format)
                .map(ExprValue::Date)
                .map_err(|_| ExprError::InvalidDate(text))
        }
        Builtin::Today => Ok(ExprValue::Date(today)),
        Builtin::Len => match &values[0] {
            ExprValue::Str(s) => Ok(ExprValue::Int(s.chars().count() as i64)),
            ExprValue::List(items) => Ok(ExprValue::Int(items.len() as i64)),
            other => Err(ExprError::Type(format!(
                "len() requires a string or list, got {}",
                other.type_name()
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 08 - 27);

    fn payload(value: Value) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("value".to_string(), value);
        map
    }

    #[test]
    fn positive_numeric_rule() {
        let p = payload(json!(100));
        assert!(evaluate("value > 0", &p, TODAY).expect("eval"));
        let p = payload(json!(-5));
        assert!(!evaluate("value > 0", &p, TODAY).expect("eval"));
    }

    #[test]
    fn percentage_range_rule() {
        let p = payload(json!(50));
        assert!(evaluate("value >= 0 and value <= 100", &p, TODAY).expect("eval"));
        let p = payload(json!(150));
        assert!(!evaluate("value >= 0 and value <= 100", &p, TODAY).expect("eval"));
    }

    #[test]
    fn container_id_regex_rule() {
        let expr = "regex_match(r'^[A-Z]{4}[0-9]{7}$', value)";
        assert!(evaluate(expr, &payload(json!("MSKU1234567")), TODAY).expect("eval"));
        assert!(!evaluate(expr, &payload(json!("BAD-ID")), TODAY).expect("eval"));
    }

    #[test]
    fn regex_match_anchors_at_start_only() {
        // re.match semantics: must match at the start, end is open.
        assert!(evaluate("regex_match('[A-Z]+', value)", &payload(json!("AB12")), TODAY)
            .expect("eval"));
        assert!(!evaluate("regex_match('[0-9]+', value)", &payload(json!("AB12")), TODAY)
            .expect("eval"));
    }

    #[test]
    fn date_rule_blocks_future_dates() {
        let expr = "parse_date(value) <= today()";
        assert!(evaluate(expr, &payload(json!("2020-01-01")), TODAY).expect("eval"));
        assert!(!evaluate(expr, &payload(json!("2099-01-01")), TODAY).expect("eval"));
    }

    #[test]
    fn parse_date_takes_leading_ten_chars() {
        let expr = "parse_date(value) == parse_date('2025-03-01')";
        assert!(evaluate(expr, &payload(json!("2025-03-01T12:30:00Z")), TODAY).expect("eval"));
    }

    #[test]
    fn unparseable_date_is_an_error() {
        let err = evaluate("parse_date(value) <= today()", &payload(json!("soon")), TODAY)
            .expect_err("must fail");
        assert_eq!(err, ExprError::InvalidDate("soon".into()));
    }

    #[test]
    fn len_counts_chars_and_items() {
        assert!(evaluate("len(value) == 2", &payload(json!("ab")), TODAY).expect("eval"));
        assert!(evaluate("len(value) == 3", &payload(json!([1, 2, 3])), TODAY).expect("eval"));
    }

    #[test]
    fn unknown_identifier_is_an_error_not_a_pass() {
        let err = evaluate("missing > 0", &payload(json!(1)), TODAY).expect_err("must fail");
        assert_eq!(err, ExprError::UnknownIdentifier("missing".into()));
    }

    #[test]
    fn type_confusion_is_an_error() {
        let err = evaluate("value > 0", &payload(json!("abc")), TODAY).expect_err("must fail");
        assert!(matches!(err, ExprError::Type(_)));
    }

    #[test]
    fn equality_across_types_is_false_not_an_error() {
        assert!(!evaluate("value == 1", &payload(json!("1")), TODAY).expect("eval"));
        assert!(evaluate("value != 1", &payload(json!("1")), TODAY).expect("eval"));
    }

    #[test]
    fn int_float_equality_coerces() {
        assert!(evaluate("value == 1.0", &payload(json!(1)), TODAY).expect("eval"));
    }

    #[test]
    fn non_boolean_result_is_an_error() {
        let err = evaluate("len(value)", &payload(json!("abc")), TODAY).expect_err("must fail");
        assert!(matches!(err, ExprError::Type(_)));
    }

    #[test]
    fn invalid_regex_is_an_error() {
        let err = evaluate("regex_match('[', value)", &payload(json!("x")), TODAY)
            .expect_err("must fail");
        assert!(matches!(err, ExprError::InvalidRegex { .. }));
    }

    #[test]
    fn not_and_boolean_connectives() {
        let p = payload(json!(5));
        assert!(evaluate("not value < 0", &p, TODAY).expect("eval"));
        assert!(evaluate("value < 0 or value > 1", &p, TODAY).expect("eval"));
        assert!(!evaluate("value < 0 and value > 1", &p, TODAY).expect("eval"));
    }
}
