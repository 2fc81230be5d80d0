use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::model::error::LoggerError;

/// A value that can be dumped into a log line.
///
/// Rendering is always a single line: embedded newlines and quotes inside
/// strings are escaped, so one log call never spans more than one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<Message>),
    Map(Vec<(String, Message)>),
}

impl Message {
    /// Builds a message from any serializable value.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, LoggerError> {
        Ok(serde_json::to_value(value)?.into())
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoggerError> {
        Ok(serde_json::from_str::<Value>(text)?.into())
    }

    /// The dump written into the log file.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Message::Null => f.write_str("null"),
            Message::Bool(b) => write!(f, "{}", b),
            Message::Int(n) => write!(f, "{}", n),
            Message::UInt(n) => write!(f, "{}", n),
            // Debug keeps the fractional part: 1.0 rather than 1
            Message::Float(x) => write!(f, "{:?}", x),
            Message::Str(s) => write!(f, "{:?}", s),
            Message::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Message::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Message::Null,
            Value::Bool(b) => Message::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Message::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Message::UInt(u)
                } else {
                    Message::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Message::Str(s),
            Value::Array(items) => Message::List(items.into_iter().map(Message::from).collect()),
            Value::Object(map) => {
                Message::Map(map.into_iter().map(|(k, v)| (k, Message::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Str(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Str(s)
    }
}

impl From<&String> for Message {
    fn from(s: &String) -> Self {
        Message::Str(s.clone())
    }
}

impl From<bool> for Message {
    fn from(b: bool) -> Self {
        Message::Bool(b)
    }
}

impl From<()> for Message {
    fn from(_: ()) -> Self {
        Message::Null
    }
}

impl From<f32> for Message {
    fn from(x: f32) -> Self {
        Message::Float(x as f64)
    }
}

impl From<f64> for Message {
    fn from(x: f64) -> Self {
        Message::Float(x)
    }
}

macro_rules! signed_message {
    ($($t:ty),*) => {
        $(impl From<$t> for Message {
            fn from(n: $t) -> Self {
                Message::Int(n as i64)
            }
        })*
    };
}

macro_rules! unsigned_message {
    ($($t:ty),*) => {
        $(impl From<$t> for Message {
            fn from(n: $t) -> Self {
                Message::UInt(n as u64)
            }
        })*
    };
}

signed_message!(i8, i16, i32, i64, isize);
unsigned_message!(u8, u16, u32, u64, usize);

impl<T: Into<Message>> From<Option<T>> for Message {
    fn from(value: Option<T>) -> Self {
        value.map_or(Message::Null, Into::into)
    }
}

impl<T: Into<Message>> From<Vec<T>> for Message {
    fn from(items: Vec<T>) -> Self {
        Message::List(items.into_iter().map(Into::into).collect())
    }
}
