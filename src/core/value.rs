use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// How two values are compared by search-oriented operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EqualityMode {
    /// Same variant and same value; objects must be the same reference.
    #[default]
    Strict,
    /// Value equality after coercion between compatible types.
    Loose,
}

impl From<bool> for EqualityMode {
    fn from(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Loose }
    }
}

/// Shared, reference-identity object.
///
/// Clones share identity; two objects built separately never do, even when
/// their fields are equal. Identity only matters for strict comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(Arc<BTreeMap<String, Value>>);

impl ObjectRef {
    pub fn new<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(Arc::new(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when both handles point at the same object.
    pub fn same_ref(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_ref(other) || *self.0 == *other.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Array(Vec<Value>),
    Object(ObjectRef),
}

#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    fn same(self, other: Numeric) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

/// Parses text the way numeric strings are recognised during loose
/// comparison: surrounding whitespace, an optional sign, digits with an
/// optional fraction and exponent.
fn parse_numeric_text(text: &str) -> Option<Numeric> {
    let trimmed = text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'));
    let allowed = |b: u8| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E');
    if trimmed.is_empty() || !trimmed.bytes().all(allowed) {
        return None;
    }
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Numeric::Int(i));
    }
    trimmed.parse::<f64>().ok().map(Numeric::Float)
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer(_) => "INTEGER",
            Self::Float(_) => "FLOAT",
            Self::Text(_) => "TEXT",
            Self::Boolean(_) => "BOOLEAN",
            Self::Array(_) => "ARRAY",
            Self::Object(_) => "OBJECT",
        }
    }

    /// Compares two values under the given mode.
    pub fn equals(&self, other: &Value, mode: EqualityMode) -> bool {
        match mode {
            EqualityMode::Strict => self.strict_eq(other),
            EqualityMode::Loose => self.loose_eq(other),
        }
    }

    /// Identical variant and value. Objects compare by reference.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Self::Object(a), Self::Object(b)) => a.same_ref(b),
            _ => false,
        }
    }

    /// Equality after coercion between compatible types.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Null, Self::Text(s)) | (Self::Text(s), Self::Null) => s.is_empty(),
            (Self::Boolean(b), v) | (v, Self::Boolean(b)) => *b == v.as_bool(),
            (Self::Null, v) | (v, Self::Null) => !v.as_bool(),

            (Self::Text(a), Self::Text(b)) => {
                match (parse_numeric_text(a), parse_numeric_text(b)) {
                    (Some(x), Some(y)) => x.same(y),
                    _ => a == b,
                }
            }
            (Self::Text(s), n) | (n, Self::Text(s)) if n.is_numeric() => {
                match (n.numeric(), parse_numeric_text(s)) {
                    (Some(x), Some(y)) => x.same(y),
                    _ => n.to_string() == *s,
                }
            }
            (a, b) if a.is_numeric() && b.is_numeric() => match (a.numeric(), b.numeric()) {
                (Some(x), Some(y)) => x.same(y),
                _ => false,
            },

            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Self::Object(a), Self::Object(b)) => {
                a.same_ref(b)
                    || (a.len() == b.len()
                        && a.fields()
                            .iter()
                            .all(|(name, v)| b.get(name).is_some_and(|w| v.loose_eq(w))))
            }
            _ => false,
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        match self {
            Self::Integer(i) => Some(Numeric::Int(*i)),
            Self::Float(f) => Some(Numeric::Float(*f)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Text(s) => !s.is_empty() && s != "0",
            Self::Array(items) => !items.is_empty(),
            Self::Object(_) => true,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Float(f) => {
                if f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Integer, float, text or boolean. Null is not a scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Integer(_) | Self::Float(_) | Self::Text(_) | Self::Boolean(_)
        )
    }

    /// Lossy projection into JSON. Objects become JSON objects and
    /// non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Integer(i) => JsonValue::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Boolean(b) => JsonValue::Bool(*b),
            Self::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Self::Object(obj) => JsonValue::Object(
                obj.fields()
                    .iter()
                    .map(|(name, v)| (name.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Builds a value from parsed JSON. Every JSON object becomes a new,
    /// distinct object reference.
    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Boolean(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Self::Text(s.clone()),
            JsonValue::Array(items) => Self::Array(items.iter().map(Value::from_json).collect()),
            JsonValue::Object(fields) => Self::Object(ObjectRef::new(
                fields.iter().map(|(name, v)| (name.clone(), Value::from_json(v))),
            )),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    return true;
                }
                a == b
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(fl) => {
                if fl.is_nan() {
                    write!(f, "NaN")
                } else if fl.is_infinite() {
                    if *fl > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{}", fl)
                }
            }
            Self::Text(s) => write!(f, "{}", s),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Object(obj) => {
                write!(f, "{{")?;
                for (i, (name, v)) in obj.fields().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Self::Object(obj)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_requires_same_type() {
        assert!(Value::Integer(1).strict_eq(&Value::Integer(1)));
        assert!(!Value::Integer(1).strict_eq(&Value::Float(1.0)));
        assert!(!Value::Integer(1).strict_eq(&Value::Text("1".into())));
        assert!(!Value::Boolean(true).strict_eq(&Value::Integer(1)));
        assert!(!Value::Float(f64::NAN).strict_eq(&Value::Float(f64::NAN)));
    }

    #[test]
    fn test_strict_objects_compare_by_reference() {
        let a = ObjectRef::new([("id", 1)]);
        let b = ObjectRef::new([("id", 1)]);
        assert!(Value::Object(a.clone()).strict_eq(&Value::Object(a.clone())));
        assert!(!Value::Object(a.clone()).strict_eq(&Value::Object(b.clone())));
        assert!(Value::Object(a).loose_eq(&Value::Object(b)));
    }

    #[test]
    fn test_loose_numeric_coercion() {
        assert!(Value::Integer(1).loose_eq(&Value::Float(1.0)));
        assert!(Value::Integer(10).loose_eq(&Value::Text("10".into())));
        assert!(Value::Text("1e1".into()).loose_eq(&Value::Text("10".into())));
        assert!(Value::Float(1.5).loose_eq(&Value::Text(" 1.5".into())));
        assert!(!Value::Integer(0).loose_eq(&Value::Text("abc".into())));
        assert!(!Value::Text("abc".into()).loose_eq(&Value::Text("ABC".into())));
    }

    #[test]
    fn test_loose_truthiness() {
        assert!(Value::Boolean(true).loose_eq(&Value::Text("key".into())));
        assert!(Value::Boolean(false).loose_eq(&Value::Integer(0)));
        assert!(Value::Null.loose_eq(&Value::Boolean(false)));
        assert!(Value::Null.loose_eq(&Value::Text(String::new())));
        assert!(!Value::Null.loose_eq(&Value::Text("0".into())));
        assert!(Value::Null.loose_eq(&Value::Array(vec![])));
        assert!(!Value::Null.loose_eq(&Value::Integer(5)));
    }

    #[test]
    fn test_loose_arrays() {
        let a = Value::from(vec![1, 2]);
        let b = Value::Array(vec![Value::Text("1".into()), Value::Float(2.0)]);
        assert!(a.loose_eq(&b));
        assert!(!a.strict_eq(&b));
        assert!(!a.loose_eq(&Value::from(vec![1])));
    }

    #[test]
    fn test_equality_mode_from_flag() {
        assert_eq!(EqualityMode::from(true), EqualityMode::Strict);
        assert_eq!(EqualityMode::from(false), EqualityMode::Loose);
        assert!(Value::Integer(3).equals(&Value::Text("3".into()), EqualityMode::Loose));
        assert!(!Value::Integer(3).equals(&Value::Text("3".into()), EqualityMode::Strict));
    }

    #[test]
    fn test_json_projection() {
        let obj = ObjectRef::new([("name", Value::from("tank"))]);
        let v = Value::from(vec![Value::Integer(1), Value::Object(obj), Value::Float(f64::NAN)]);
        assert_eq!(v.to_json(), serde_json::json!([1, {"name": "tank"}, null]));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"a": [1, 2.5, "x", true, null]});
        let v = Value::from_json(&json);
        let obj = v.as_object().unwrap();
        assert_eq!(
            obj.get("a"),
            Some(&Value::Array(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::Text("x".into()),
                Value::Boolean(true),
                Value::Null,
            ]))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(vec![5, 5]).to_string(), "[5, 5]");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Float(1.0).to_string(), "1");
    }
}
