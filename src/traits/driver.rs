use async_trait::async_trait;

use crate::types::{ConnectionSettings, ExecStatus, ParamValues, ResultFormat, SessionStatus};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Opening native sessions from connection settings
/// - Sending parameterized statements over those sessions
/// - Reporting status and diagnostics the way the native client does
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    type Session: Session;

    /// Open a session. A handle is returned even when opening fails; its
    /// [`Session::status`] reports the outcome.
    async fn open_session(&self, settings: &ConnectionSettings) -> Self::Session;
}

/// An exclusively owned native session handle.
#[async_trait]
pub trait Session: Send {
    type Result: ResultHandle;

    fn status(&self) -> SessionStatus;

    /// Last diagnostic recorded on the session, if any.
    fn error_message(&self) -> Option<String>;

    /// Execute a statement with positional parameters.
    /// Parameters use PostgreSQL-style placeholders ($1, $2, etc.) and are
    /// sent as text with server-inferred types.
    async fn exec_params(
        &mut self,
        query: &str,
        values: &ParamValues<'_>,
        result_format: ResultFormat,
    ) -> Self::Result;

    /// Tear the session down. Called exactly once, by the owning connection.
    async fn finish(&mut self);
}

/// An exclusively owned native result handle. Dropping it releases the result.
pub trait ResultHandle: Send {
    fn status(&self) -> ExecStatus;

    fn error_message(&self) -> Option<String>;

    /// Number of tuples returned.
    fn ntuples(&self) -> usize;

    /// Number of fields in each tuple.
    fn nfields(&self) -> usize;

    fn field_name(&self, column: usize) -> Option<&str>;

    /// Type OID of a field.
    fn field_type(&self, column: usize) -> Option<u32>;

    /// Raw value of a field; `None` is SQL NULL or out of range.
    fn value(&self, row: usize, column: usize) -> Option<&[u8]>;

    /// Row count from the command tag, when the statement reported one.
    fn rows_affected(&self) -> Option<u64>;
}
