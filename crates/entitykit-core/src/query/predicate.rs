use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    ops::{BitAnd, BitOr, Not},
};

///
/// Predicate AST
///
/// Pure, schema-agnostic filter expression handed to the store untouched.
/// Field names are stored names (or dotted paths through relationships);
/// this layer does not interpret them unless strict field checking is on.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Ne = 0x02,
    Lt = 0x03,
    Lte = 0x04,
    Gt = 0x05,
    Gte = 0x06,
    In = 0x07,
    NotIn = 0x08,
    Contains = 0x09,
    StartsWith = 0x0a,
    EndsWith = 0x0b,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Contains => "CONTAINS",
            Self::StartsWith => "BEGINSWITH",
            Self::EndsWith => "ENDSWITH",
        }
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    IsNull { field: String },
    IsEmpty { field: String },
    IsNotEmpty { field: String },
    TextContains { field: String, value: Value },
    TextContainsCi { field: String, value: Value },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[must_use]
    pub fn compare(field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, op, value))
    }

    /// Every field name referenced by this predicate, in first-seen order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::True | Self::False => {}
            Self::And(preds) | Self::Or(preds) => {
                for pred in preds {
                    pred.collect_fields(out);
                }
            }
            Self::Not(inner) => inner.collect_fields(out),
            Self::Compare(cmp) => push_unique(out, &cmp.field),
            Self::IsNull { field }
            | Self::IsEmpty { field }
            | Self::IsNotEmpty { field }
            | Self::TextContains { field, .. }
            | Self::TextContainsCi { field, .. } => push_unique(out, field),
        }
    }
}

fn push_unique<'a>(out: &mut Vec<&'a str>, field: &'a str) {
    if !out.contains(&field) {
        out.push(field);
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl Not for Predicate {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

// Renders in the store's textual predicate syntax, e.g. `age > 18 AND name == "ice"`.
impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUEPREDICATE"),
            Self::False => f.write_str("FALSEPREDICATE"),
            Self::And(preds) => write_joined(f, preds, " AND ", "TRUEPREDICATE"),
            Self::Or(preds) => write_joined(f, preds, " OR ", "FALSEPREDICATE"),
            Self::Not(inner) => write!(f, "NOT ({inner})"),
            Self::Compare(cmp) => write!(f, "{} {} {}", cmp.field, cmp.op.symbol(), cmp.value),
            Self::IsNull { field } => write!(f, "{field} == nil"),
            Self::IsEmpty { field } => write!(f, "{field}.@count == 0"),
            Self::IsNotEmpty { field } => write!(f, "{field}.@count > 0"),
            Self::TextContains { field, value } => write!(f, "{field} CONTAINS {value}"),
            Self::TextContainsCi { field, value } => write!(f, "{field} CONTAINS[c] {value}"),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    preds: &[Predicate],
    sep: &str,
    empty: &str,
) -> fmt::Result {
    if preds.is_empty() {
        return f.write_str(empty);
    }

    for (i, pred) in preds.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        match pred {
            Predicate::And(_) | Predicate::Or(_) => write!(f, "({pred})")?,
            _ => write!(f, "{pred}")?,
        }
    }

    Ok(())
}
