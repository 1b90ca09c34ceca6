/// Binary operators, in Python-compatible spelling on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// The builtin allow-list. Calls to anything else are rejected at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    RegexMatch,
    ParseDate,
    Today,
    Len,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "regex_match" => Some(Builtin::RegexMatch),
            "parse_date" => Some(Builtin::ParseDate),
            "today" => Some(Builtin::Today),
            "len" => Some(Builtin::Len),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::RegexMatch => "regex_match",
            Builtin::ParseDate => "parse_date",
            Builtin::Today => "today",
            Builtin::Len => "len",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Builtin::RegexMatch => 2,
            Builtin::ParseDate => 1,
            Builtin::Today => 0,
            Builtin::Len => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Typed expression tree. Tagged-variant dispatch per node kind; no host eval.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// Resolved against the payload map at evaluation time.
    Ident(String),
    Not(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Builtin,
        args: Vec<Expr>,
    },
}
