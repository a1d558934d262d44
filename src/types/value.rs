/// Type OIDs decoded by [`Value::decode`].
pub mod oid {
    pub const BOOL: u32 = 16;
    pub const BYTEA: u32 = 17;
    pub const CHAR: u32 = 18;
    pub const NAME: u32 = 19;
    pub const INT8: u32 = 20;
    pub const INT2: u32 = 21;
    pub const INT4: u32 = 23;
    pub const TEXT: u32 = 25;
    pub const OID: u32 = 26;
    pub const JSON: u32 = 114;
    pub const FLOAT4: u32 = 700;
    pub const FLOAT8: u32 = 701;
    pub const UNKNOWN: u32 = 705;
    pub const BPCHAR: u32 = 1042;
    pub const VARCHAR: u32 = 1043;
    pub const JSONB: u32 = 3802;
}

/// A binary-format result value decoded by its column type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// A type this crate does not decode, or bytes that did not fit their type.
    Raw { oid: u32, bytes: Vec<u8> },
}

impl Value {
    /// Decodes a binary value. Never fails; unknown or malformed input becomes [`Value::Raw`].
    pub fn decode(type_oid: u32, raw: Option<&[u8]>) -> Self {
        let Some(bytes) = raw else {
            return Value::Null;
        };
        decode_known(type_oid, bytes).unwrap_or_else(|| Value::Raw {
            oid: type_oid,
            bytes: bytes.to_vec(),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int16(i) => Some(i64::from(*i)),
            Value::Int32(i) => Some(i64::from(*i)),
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(f) => Some(f64::from(*f)),
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn decode_known(type_oid: u32, bytes: &[u8]) -> Option<Value> {
    let value = match type_oid {
        oid::BOOL => match bytes {
            [b] => Value::Bool(*b != 0),
            _ => return None,
        },
        oid::INT2 => Value::Int16(i16::from_be_bytes(bytes.try_into().ok()?)),
        oid::INT4 => Value::Int32(i32::from_be_bytes(bytes.try_into().ok()?)),
        oid::INT8 => Value::Int64(i64::from_be_bytes(bytes.try_into().ok()?)),
        oid::OID => Value::Int64(i64::from(u32::from_be_bytes(bytes.try_into().ok()?))),
        oid::FLOAT4 => Value::Float32(f32::from_be_bytes(bytes.try_into().ok()?)),
        oid::FLOAT8 => Value::Float64(f64::from_be_bytes(bytes.try_into().ok()?)),
        oid::CHAR
        | oid::NAME
        | oid::TEXT
        | oid::JSON
        | oid::UNKNOWN
        | oid::BPCHAR
        | oid::VARCHAR => Value::Text(std::str::from_utf8(bytes).ok()?.to_string()),
        // jsonb binary format is a version byte followed by the JSON text.
        oid::JSONB => match bytes.split_first() {
            Some((&1, rest)) => Value::Text(std::str::from_utf8(rest).ok()?.to_string()),
            _ => return None,
        },
        oid::BYTEA => Value::Bytes(bytes.to_vec()),
        _ => return None,
    };
    Some(value)
}
