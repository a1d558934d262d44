use std::fmt;

use tokio::runtime::{Builder, Runtime};
use tracing::{debug, trace, warn};

use crate::drivers::{TokioPostgresDriver, TokioPostgresSession};
use crate::error::{ConnectionError, Result};
use crate::traits::{DatabaseDriver, Parameter, ResultHandle, Session};
use crate::types::{ConnectionSettings, EncodedParams, QueryResult, ResultFormat, SessionStatus};

/// An open connection to the database usable for executing queries.
///
/// A `Connection` only exists once its session is open, and the session is
/// closed exactly once when the `Connection` is dropped. Calls block the
/// current thread; `execute` takes `&mut self`, so one connection is never
/// used by two callers at once. Each thread needs its own connection.
///
/// A connection owns a single-threaded tokio runtime and must not be used
/// from inside another tokio runtime.
pub struct Connection<S: Session = TokioPostgresSession> {
    session: S,
    runtime: Runtime,
}

impl Connection {
    /// Connect to a PostgreSQL database using tokio-postgres.
    ///
    /// # Example
    /// ```ignore
    /// let settings = ConnectionSettings::new().database("app").user("app");
    /// let mut conn = Connection::open(&settings)?;
    /// ```
    pub fn open(settings: &ConnectionSettings) -> Result<Self> {
        Self::open_with(&TokioPostgresDriver, settings)
    }
}

impl<S: Session> Connection<S> {
    /// Open a connection through a custom driver.
    /// Useful for testing or using alternative database drivers.
    pub fn open_with<D>(driver: &D, settings: &ConnectionSettings) -> Result<Self>
    where
        D: DatabaseDriver<Session = S>,
    {
        debug!(
            host = %settings.host,
            port = %settings.port,
            database = %settings.database,
            user = %settings.user,
            "opening connection"
        );

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ConnectionError::ConnectionFailed(e.to_string()))?;

        let mut session = runtime.block_on(driver.open_session(settings));
        if session.status() != SessionStatus::Ok {
            let err = ConnectionError::connection_failed(session.error_message());
            warn!(host = %settings.host, error = %err, "connection failed");
            // The failed handle still has to be released.
            runtime.block_on(session.finish());
            return Err(err);
        }

        debug!(host = %settings.host, database = %settings.database, "connection open");
        Ok(Self { session, runtime })
    }

    /// Executes a query.
    ///
    /// The first parameter is referred to as `$1` in the query. Results are
    /// requested in binary format.
    pub fn execute(
        &mut self,
        query: &str,
        parameters: &[&dyn Parameter],
    ) -> Result<QueryResult<S::Result>> {
        let encoded = EncodedParams::encode(parameters);
        let values = encoded.values();
        trace!(query, params = values.len(), "executing query");

        let result = self.runtime.block_on(self.session.exec_params(
            query,
            &values,
            ResultFormat::Binary,
        ));
        drop(values);
        drop(encoded);

        let status = result.status();
        if status.is_success() {
            debug!(?status, rows = result.ntuples(), "query succeeded");
            Ok(QueryResult::new(result))
        } else {
            let err = ConnectionError::invalid_query(result.error_message());
            debug!(?status, error = %err, "query failed");
            Err(err)
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &S {
        &self.session
    }
}

impl<S: Session> fmt::Debug for Connection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("status", &self.session.status())
            .finish_non_exhaustive()
    }
}

impl<S: Session> Drop for Connection<S> {
    fn drop(&mut self) {
        debug!("closing connection");
        self.runtime.block_on(self.session.finish());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{InMemoryTestDriver, InMemoryTestResponseBuilder};
    use crate::types::ExecStatus;

    #[test]
    fn test_execute_records_binary_format_and_params() {
        let driver = InMemoryTestDriver::new()
            .with_response(InMemoryTestResponseBuilder::new().columns(&["a"]).build());
        let mut conn = Connection::open_with(&driver, &ConnectionSettings::default()).unwrap();

        conn.execute("SELECT $1, $2", &[&1i32, &"x"]).unwrap();

        let last = driver.last_query().unwrap();
        assert_eq!(last.params, vec!["1".to_string(), "x".to_string()]);
        assert_eq!(last.result_format, ResultFormat::Binary);
    }

    #[test]
    fn test_failed_result_is_released_before_error_returns() {
        let driver = InMemoryTestDriver::new().with_response(
            InMemoryTestResponseBuilder::error(ExecStatus::FatalError, "boom").build(),
        );
        let mut conn = Connection::open_with(&driver, &ConnectionSettings::default()).unwrap();

        let err = conn.execute("SELECT 1", &[]).unwrap_err();
        assert_eq!(err, ConnectionError::InvalidQuery("boom".to_string()));
        assert_eq!(driver.results_released(), 1);
    }

    #[test]
    fn test_session_status_is_ok_while_open() {
        let driver = InMemoryTestDriver::new();
        let conn = Connection::open_with(&driver, &ConnectionSettings::default()).unwrap();
        assert_eq!(conn.session().status(), SessionStatus::Ok);
    }

    #[test]
    fn test_debug_shows_status_only() {
        let driver = InMemoryTestDriver::new();
        let conn = Connection::open_with(&driver, &ConnectionSettings::default()).unwrap();
        assert_eq!(format!("{:?}", conn), "Connection { status: Ok, .. }");
    }

    #[test]
    fn test_open_error_can_be_unwrapped() {
        let driver = InMemoryTestDriver::new().rejecting_connections(Some("no route to host"));
        let err = Connection::open_with(&driver, &ConnectionSettings::default()).unwrap_err();
        assert_eq!(err, ConnectionError::ConnectionFailed("no route to host".to_string()));
    }
}
