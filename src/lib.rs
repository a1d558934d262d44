//! pgexec - A small, synchronous PostgreSQL connection and query layer
//!
//! A [`Connection`] owns exactly one native session, executes parameterized
//! statements with text-format parameters and binary-format results, and
//! closes the session when it is dropped.
//!
//! # Example
//! ```ignore
//! use pgexec::{Connection, ConnectionSettings};
//!
//! let settings = ConnectionSettings::from_env();
//! let mut conn = Connection::open(&settings)?;
//!
//! let result = conn.execute("SELECT $1::int AS answer", &[&42])?;
//! let row = result.single_row().expect("one row");
//! assert_eq!(row.value(0).as_i64(), Some(42));
//!
//! conn.execute("DELETE FROM sessions WHERE id = $1", &[&"abc"])?;
//! ```

pub mod drivers;
pub mod error;
pub mod traits;
pub mod types;

mod connection;

// Re-export main types for convenient access
pub use connection::Connection;
pub use error::{ConnectionError, Result, UNKNOWN_ERROR};
pub use traits::{DatabaseDriver, Parameter, ResultHandle, Session};
pub use types::{
    oid, ConnectionSettings, EncodedParams, ExecStatus, ParamValues, QueryResult, ResultFormat,
    Row, SessionStatus, Value,
};
