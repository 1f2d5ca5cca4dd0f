//! Property codec: scalar values to and from the store's multi-value wrapper.
//!
//! Every scalar vertex property travels as a one-element array holding an
//! `{ "id": ..., "value": ... }` object. [`PropertyCodec`] strips that
//! wrapping on the way in and rebuilds it on the way out. Coercion of the
//! inner value depends on the target type, so there is one codec per
//! [`PropertyScalar`] type.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

use crate::error::CodecError;
use crate::types::{VertexProperty, ID_PROPERTY};

/// Wire name of the wrapped scalar.
pub const VALUE_PROPERTY: &str = "value";

// ── Scalar kinds ──────────────────────────────────────────────────

/// Primitive kind of a property value, used to pick coercion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Integer,
    Float,
    String,
    DateTime,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// A Rust type that can live inside a wrapped vertex property.
pub trait PropertyScalar: Sized + Send + Sync + 'static {
    const KIND: ScalarKind;

    /// The natural JSON literal for this value.
    ///
    /// Fails for values JSON cannot carry (NaN and infinite floats).
    fn to_token(&self) -> Result<Value, CodecError>;

    /// Coerce a JSON literal into this type, following the usual conversion
    /// rules of the kind (numeric strings parse, "true"/"false" become
    /// booleans, and so on).
    fn coerce(token: &Value) -> Result<Self, CodecError>;
}

impl PropertyScalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn to_token(&self) -> Result<Value, CodecError> {
        Ok(Value::Bool(*self))
    }

    fn coerce(token: &Value) -> Result<Self, CodecError> {
        match token {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
            Value::Number(n) => n
                .as_f64()
                .map(|f| f != 0.0)
                .ok_or_else(|| CodecError::coercion(Self::KIND, token)),
            _ => Err(CodecError::coercion(Self::KIND, token)),
        }
    }
}

/// Integral reading of a token, wide enough for every supported integer type.
fn integral(token: &Value) -> Option<i128> {
    match token {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(i128::from(u))
            } else {
                n.as_f64().and_then(whole)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i128>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        Value::Bool(b) => Some(i128::from(*b)),
        _ => None,
    }
}

fn whole(f: f64) -> Option<i128> {
    // Values outside i128 are rejected by the target type's try_from anyway.
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38).then_some(f as i128)
}

macro_rules! integer_scalar {
    ($($ty:ty),*) => {$(
        impl PropertyScalar for $ty {
            const KIND: ScalarKind = ScalarKind::Integer;

            fn to_token(&self) -> Result<Value, CodecError> {
                Ok(Value::from(*self))
            }

            fn coerce(token: &Value) -> Result<Self, CodecError> {
                integral(token)
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or_else(|| CodecError::coercion(Self::KIND, token))
            }
        }
    )*};
}

integer_scalar!(i32, i64, u32, u64);

fn float(token: &Value) -> Option<f64> {
    match token {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn finite(f: f64) -> Result<Value, CodecError> {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or(CodecError::NonFinite { value: f })
}

impl PropertyScalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn to_token(&self) -> Result<Value, CodecError> {
        finite(*self)
    }

    fn coerce(token: &Value) -> Result<Self, CodecError> {
        float(token).ok_or_else(|| CodecError::coercion(Self::KIND, token))
    }
}

impl PropertyScalar for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn to_token(&self) -> Result<Value, CodecError> {
        finite(f64::from(*self))
    }

    fn coerce(token: &Value) -> Result<Self, CodecError> {
        float(token)
            .filter(|f| !f.is_finite() || f.abs() <= f64::from(f32::MAX))
            .map(|f| f as f32)
            .ok_or_else(|| CodecError::coercion(Self::KIND, token))
    }
}

impl PropertyScalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn to_token(&self) -> Result<Value, CodecError> {
        Ok(Value::String(self.clone()))
    }

    fn coerce(token: &Value) -> Result<Self, CodecError> {
        match token {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(CodecError::coercion(Self::KIND, token)),
        }
    }
}

impl PropertyScalar for DateTime<Utc> {
    const KIND: ScalarKind = ScalarKind::DateTime;

    fn to_token(&self) -> Result<Value, CodecError> {
        Ok(Value::String(self.to_rfc3339()))
    }

    fn coerce(token: &Value) -> Result<Self, CodecError> {
        token
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
            .map(|d| d.with_timezone(&Utc))
            .ok_or_else(|| CodecError::coercion(Self::KIND, token))
    }
}

/// Nullable properties: `null` on the wire is `None`.
impl<T: PropertyScalar> PropertyScalar for Option<T> {
    const KIND: ScalarKind = T::KIND;

    fn to_token(&self) -> Result<Value, CodecError> {
        self.as_ref().map_or(Ok(Value::Null), PropertyScalar::to_token)
    }

    fn coerce(token: &Value) -> Result<Self, CodecError> {
        match token {
            Value::Null => Ok(None),
            other => T::coerce(other).map(Some),
        }
    }
}

// ── Codec ─────────────────────────────────────────────────────────

/// Stateless codec for one scalar type.
pub struct PropertyCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: PropertyScalar> PropertyCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    pub fn kind(&self) -> ScalarKind {
        T::KIND
    }

    /// Decode a wrapped property into its scalar value.
    ///
    /// Returns `Ok(None)` when the token does not have the expected
    /// `[{ "id", "value" }]` shape; fails only when the value cannot be
    /// coerced into `T`.
    pub fn decode(&self, token: &Value) -> Result<Option<T>, CodecError> {
        Ok(self.decode_property(token)?.map(|p| p.value))
    }

    /// Like [`decode`](Self::decode), keeping the store-assigned property id.
    pub fn decode_property(&self, token: &Value) -> Result<Option<VertexProperty<T>>, CodecError> {
        let Some(first) = token.as_array().and_then(|items| items.first()) else {
            return Ok(None);
        };
        let Some(object) = first.as_object() else {
            return Ok(None);
        };

        // `id` then `value`, as the first two entries in document order.
        let mut entries = object.iter();
        let id = match entries.next() {
            Some((key, id)) if key == ID_PROPERTY => match id {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
            _ => return Ok(None),
        };
        let value = match entries.next() {
            Some((key, value)) if key == VALUE_PROPERTY => T::coerce(value)?,
            _ => return Ok(None),
        };

        Ok(Some(VertexProperty { id, value }))
    }

    /// Encode a property into the full `[{ "id", "value" }]` shape.
    pub fn encode(&self, property: &VertexProperty<T>) -> Result<Value, CodecError> {
        self.encode_parts(property.id.as_deref(), &property.value)
    }

    /// Encode a value that has no property id yet.
    pub fn encode_value(&self, value: &T) -> Result<Value, CodecError> {
        self.encode_parts(None, value)
    }

    fn encode_parts(&self, id: Option<&str>, value: &T) -> Result<Value, CodecError> {
        let mut entry = Map::with_capacity(2);
        entry.insert(
            ID_PROPERTY.to_string(),
            id.map_or(Value::Null, |id| Value::String(id.to_string())),
        );
        entry.insert(VALUE_PROPERTY.to_string(), value.to_token()?);
        Ok(Value::Array(vec![Value::Object(entry)]))
    }
}

impl<T: PropertyScalar> Default for PropertyCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PropertyScalar> fmt::Debug for PropertyCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyCodec")
            .field("type", &std::any::type_name::<T>())
            .field("kind", &T::KIND)
            .finish()
    }
}
