//! Runtime value model.
//!
//! Values form a small tagged family: `Int`, `Float` and `Bool`, each a
//! numeric payload plus the position of the originating lexeme (used for
//! error reporting on arithmetic failures). `Bool` behaves as a subtype
//! of `Int`: its payload is always normalized to exactly 0 or 1.
//!
//! Arithmetic follows the family rules: operands sharing a variant keep
//! it, otherwise the result takes the left operand's variant, and the
//! payload is re-normalized by the result variant. Division always
//! produces a `Float` and checks the right operand for zero. Equality is
//! payload equality across the whole family.

use crate::error::{PyllowError, PyllowResult};
use crate::Position;
use std::fmt;

/// The variant of a runtime value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "int"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Bool => write!(f, "bool"),
        }
    }
}

/// A runtime value: variant tag, numeric payload, source position.
#[derive(Clone, Debug)]
pub struct Value {
    kind: ValueKind,
    payload: f64,
    position: Position,
}

/// Re-normalize `payload` for `kind`: integers truncate toward zero,
/// booleans collapse to 0/1, floats pass through.
fn normalize(kind: ValueKind, payload: f64) -> f64 {
    match kind {
        ValueKind::Int => payload.trunc(),
        ValueKind::Float => payload,
        ValueKind::Bool => {
            if payload != 0.0 {
                1.0
            } else {
                0.0
            }
        }
    }
}

impl Value {
    /// Construct a value of `kind`, normalizing the payload.
    pub fn new(kind: ValueKind, payload: f64, position: Position) -> Self {
        Self {
            kind,
            payload: normalize(kind, payload),
            position,
        }
    }

    /// An `Int` value.
    pub fn int(payload: i64, position: Position) -> Self {
        Self::new(ValueKind::Int, payload as f64, position)
    }

    /// A `Float` value.
    pub fn float(payload: f64, position: Position) -> Self {
        Self::new(ValueKind::Float, payload, position)
    }

    /// A `Bool` value.
    pub fn bool(payload: bool, position: Position) -> Self {
        Self::new(ValueKind::Bool, if payload { 1.0 } else { 0.0 }, position)
    }

    /// Parse a `Float` from its literal spelling.
    pub fn float_from_lexeme(text: &str, position: Position) -> PyllowResult<Self> {
        match text.parse::<f64>() {
            Ok(payload) => Ok(Self::new(ValueKind::Float, payload, position)),
            Err(_) => Err(PyllowError::value(
                format!("Cannot convert \"{text}\" to float"),
                position,
            )),
        }
    }

    /// Parse an `Int` from its literal spelling: a float pass first,
    /// then truncation toward zero.
    pub fn int_from_lexeme(text: &str, position: Position) -> PyllowResult<Self> {
        match text.parse::<f64>() {
            Ok(payload) => Ok(Self::new(ValueKind::Int, payload, position)),
            Err(_) => Err(PyllowError::value(
                format!("Cannot convert \"{text}\" to int"),
                position,
            )),
        }
    }

    /// Parse a `Bool`: the spellings `true`/`false`, or any numeric
    /// payload normalized to 0/1.
    pub fn bool_from_lexeme(text: &str, position: Position) -> PyllowResult<Self> {
        match text {
            "true" => Ok(Self::bool(true, position)),
            "false" => Ok(Self::bool(false, position)),
            other => match other.parse::<f64>() {
                Ok(payload) => Ok(Self::new(ValueKind::Bool, payload, position)),
                Err(_) => Err(PyllowError::value(
                    format!("Cannot convert \"{other}\" to bool"),
                    position,
                )),
            },
        }
    }

    /// The variant tag.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The raw numeric payload.
    pub fn payload(&self) -> f64 {
        self.payload
    }

    /// The position of the originating lexeme.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Truthiness: any non-zero payload.
    pub fn is_truthy(&self) -> bool {
        self.payload != 0.0
    }

    fn arith(&self, other: &Value, f: impl Fn(f64, f64) -> f64) -> Value {
        Value::new(self.kind, f(self.payload, other.payload), self.position.clone())
    }

    /// `self + other`; the result takes the shared variant, or the left
    /// operand's.
    pub fn add(&self, other: &Value) -> Value {
        self.arith(other, |a, b| a + b)
    }

    /// `self - other`.
    pub fn sub(&self, other: &Value) -> Value {
        self.arith(other, |a, b| a - b)
    }

    /// `self * other`.
    pub fn mul(&self, other: &Value) -> Value {
        self.arith(other, |a, b| a * b)
    }

    /// `self ^ other`.
    pub fn pow(&self, other: &Value) -> Value {
        self.arith(other, |a, b| a.powf(b))
    }

    /// `self / other`; always a `Float`, and a zero right operand is a
    /// zero-division error at the left operand's position.
    pub fn div(&self, other: &Value) -> PyllowResult<Value> {
        if other.payload == 0.0 {
            return Err(PyllowError::zero_division(
                "Division by zero",
                self.position.clone(),
            ));
        }
        Ok(Value::new(
            ValueKind::Float,
            self.payload / other.payload,
            self.position.clone(),
        ))
    }

    fn compare(&self, result: bool) -> Value {
        Value::bool(result, self.position.clone())
    }

    /// `self == other` as a `Bool`; payload equality across the family.
    pub fn equals(&self, other: &Value) -> Value {
        self.compare(self.payload == other.payload)
    }

    /// `self != other` as a `Bool`.
    pub fn not_equals(&self, other: &Value) -> Value {
        self.compare(self.payload != other.payload)
    }

    /// `self < other` as a `Bool`.
    pub fn less_than(&self, other: &Value) -> Value {
        self.compare(self.payload < other.payload)
    }

    /// `self > other` as a `Bool`.
    pub fn greater_than(&self, other: &Value) -> Value {
        self.compare(self.payload > other.payload)
    }

    /// `self <= other` as a `Bool`.
    pub fn less_equal(&self, other: &Value) -> Value {
        self.compare(self.payload <= other.payload)
    }

    /// `self >= other` as a `Bool`.
    pub fn greater_equal(&self, other: &Value) -> Value {
        self.compare(self.payload >= other.payload)
    }

    /// Unary `-`; keeps the variant (a negated `Bool` re-normalizes).
    pub fn neg(&self) -> Value {
        Value::new(self.kind, -self.payload, self.position.clone())
    }

    /// Unary `+`.
    pub fn pos(&self) -> Value {
        Value::new(self.kind, self.payload, self.position.clone())
    }

    /// Unary `!`: the `Bool` complement of truthiness.
    pub fn not(&self) -> Value {
        Value::bool(!self.is_truthy(), self.position.clone())
    }
}

impl PartialEq for Value {
    /// Payload equality across the family: `Int(1)`, `Float(1.0)` and
    /// `Bool(true)` all compare equal.
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValueKind::Int => write!(f, "{}", self.payload as i64),
            ValueKind::Float => {
                if self.payload.fract() == 0.0 && self.payload.is_finite() {
                    write!(f, "{:.1}", self.payload)
                } else {
                    write!(f, "{}", self.payload)
                }
            }
            ValueKind::Bool => {
                if self.is_truthy() {
                    write!(f, "true")
                } else {
                    write!(f, "false")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::dummy()
    }

    fn int(n: i64) -> Value {
        Value::int(n, pos())
    }

    fn float(n: f64) -> Value {
        Value::float(n, pos())
    }

    #[test]
    fn test_add() {
        assert_eq!(int(5).add(&int(2)), int(7));
        assert_eq!(float(5.0).add(&float(2.5)), float(7.5));
    }

    #[test]
    fn test_sub() {
        assert_eq!(int(5).sub(&int(2)), int(3));
        assert_eq!(float(5.0).sub(&float(2.0)), float(3.0));
    }

    #[test]
    fn test_mul() {
        assert_eq!(int(5).mul(&int(2)), int(10));
        assert_eq!(float(5.0).mul(&float(2.0)), float(10.0));
    }

    #[test]
    fn test_div_always_float() {
        let result = int(5).div(&int(2)).unwrap();
        assert_eq!(result.kind(), ValueKind::Float);
        assert_eq!(result.payload(), 2.5);
    }

    #[test]
    fn test_div_by_zero() {
        let err = float(5.0).div(&float(0.0)).unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::ZeroDivision);
        assert_eq!(err.message, "Division by zero");

        let err = int(5).div(&int(0)).unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::ZeroDivision);
    }

    #[test]
    fn test_pow() {
        assert_eq!(int(5).pow(&int(2)), int(25));
        assert_eq!(int(4).pow(&int(2)), int(16));
        assert_eq!(float(2.0).pow(&float(0.5)), float(2.0_f64.powf(0.5)));
    }

    #[test]
    fn test_mixed_variant_takes_left() {
        let result = int(1).add(&float(2.5));
        assert_eq!(result.kind(), ValueKind::Int);
        assert_eq!(result.payload(), 3.0);

        let result = float(2.5).add(&int(1));
        assert_eq!(result.kind(), ValueKind::Float);
        assert_eq!(result.payload(), 3.5);
    }

    #[test]
    fn test_bool_arith_normalizes() {
        let t = Value::bool(true, pos());
        let sum = t.add(&t);
        assert_eq!(sum.kind(), ValueKind::Bool);
        assert_eq!(sum.payload(), 1.0);
    }

    #[test]
    fn test_comparisons() {
        assert!(int(1).less_than(&int(2)).is_truthy());
        assert!(!int(2).less_than(&int(1)).is_truthy());
        assert!(int(2).greater_than(&int(1)).is_truthy());
        assert!(int(2).less_equal(&int(2)).is_truthy());
        assert!(int(2).greater_equal(&int(2)).is_truthy());
        assert!(int(1).equals(&int(1)).is_truthy());
        assert!(int(1).not_equals(&int(2)).is_truthy());
    }

    #[test]
    fn test_equality_across_family() {
        assert_eq!(int(1), float(1.0));
        assert_eq!(int(1), Value::bool(true, pos()));
        assert_eq!(int(0), Value::bool(false, pos()));
        assert_ne!(int(1), int(2));
    }

    #[test]
    fn test_unary() {
        assert_eq!(int(5).neg(), int(-5));
        assert_eq!(int(5).pos(), int(5));
        assert_eq!(float(1.5).neg(), float(-1.5));
        assert!(!int(5).not().is_truthy());
        assert!(int(0).not().is_truthy());
        assert_eq!(int(5).not().kind(), ValueKind::Bool);
    }

    #[test]
    fn test_neg_bool_stays_normalized() {
        let negated = Value::bool(true, pos()).neg();
        assert_eq!(negated.kind(), ValueKind::Bool);
        assert_eq!(negated.payload(), 1.0);
    }

    #[test]
    fn test_float_from_lexeme() {
        assert_eq!(Value::float_from_lexeme("45.6", pos()).unwrap().payload(), 45.6);
        assert_eq!(Value::float_from_lexeme("1", pos()).unwrap().payload(), 1.0);
        let err = Value::float_from_lexeme("test", pos()).unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Value);
        assert_eq!(err.message, "Cannot convert \"test\" to float");
    }

    #[test]
    fn test_int_from_lexeme_truncates() {
        assert_eq!(Value::int_from_lexeme("1", pos()).unwrap().payload(), 1.0);
        assert_eq!(Value::int_from_lexeme("45.6", pos()).unwrap().payload(), 45.0);
        assert!(Value::int_from_lexeme("x", pos()).is_err());
    }

    #[test]
    fn test_bool_from_lexeme() {
        assert_eq!(Value::bool_from_lexeme("true", pos()).unwrap().payload(), 1.0);
        assert_eq!(Value::bool_from_lexeme("false", pos()).unwrap().payload(), 0.0);
        assert_eq!(Value::bool_from_lexeme("5", pos()).unwrap().payload(), 1.0);
        assert_eq!(Value::bool_from_lexeme("0.0", pos()).unwrap().payload(), 0.0);
        assert!(Value::bool_from_lexeme("maybe", pos()).is_err());
    }

    #[test]
    fn test_truthiness() {
        assert!(int(5).is_truthy());
        assert!(!int(0).is_truthy());
        assert!(float(0.1).is_truthy());
        assert!(!float(0.0).is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(int(7).to_string(), "7");
        assert_eq!(float(7.0).to_string(), "7.0");
        assert_eq!(float(2.5).to_string(), "2.5");
        assert_eq!(Value::bool(true, pos()).to_string(), "true");
        assert_eq!(Value::bool(false, pos()).to_string(), "false");
    }
}
