use std::error::Error as StdError;
use std::ffi::CStr;

use async_trait::async_trait;
use bytes::BytesMut;
use futures_util::{pin_mut, TryStreamExt};
use tokio::task::JoinHandle;
use tokio_postgres::types::{to_sql_checked, Format, FromSql, IsNull, ToSql, Type};
use tokio_postgres::{Client, Config, NoTls, Row, Statement};
use tracing::{debug, warn};

use crate::traits::{DatabaseDriver, ResultHandle, Session};
use crate::types::{ConnectionSettings, ExecStatus, ParamValues, ResultFormat, SessionStatus};

/// PostgreSQL driver implementation using tokio-postgres.
///
/// Must be used from within a tokio runtime; [`crate::Connection`] provides one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPostgresDriver;

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    type Session = TokioPostgresSession;

    async fn open_session(&self, settings: &ConnectionSettings) -> TokioPostgresSession {
        let config = match build_config(settings) {
            Ok(config) => config,
            Err(message) => return TokioPostgresSession::bad(message),
        };

        match config.connect(NoTls).await {
            Ok((client, connection)) => {
                // Drives the socket; it only makes progress while the owner blocks on a call.
                let task = tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        warn!(error = %e, "PostgreSQL connection error");
                    }
                });
                TokioPostgresSession {
                    client: Some(client),
                    task: Some(task),
                    error_message: None,
                }
            }
            Err(e) => TokioPostgresSession::bad(error_text(&e)),
        }
    }
}

/// Session handle backed by a tokio-postgres client and its connection task.
pub struct TokioPostgresSession {
    client: Option<Client>,
    task: Option<JoinHandle<()>>,
    error_message: Option<String>,
}

impl TokioPostgresSession {
    fn bad(message: String) -> Self {
        Self {
            client: None,
            task: None,
            error_message: Some(message),
        }
    }
}

#[async_trait]
impl Session for TokioPostgresSession {
    type Result = TokioPostgresResult;

    fn status(&self) -> SessionStatus {
        match &self.client {
            Some(client) if !client.is_closed() => SessionStatus::Ok,
            _ => SessionStatus::Bad,
        }
    }

    fn error_message(&self) -> Option<String> {
        self.error_message.clone()
    }

    async fn exec_params(
        &mut self,
        query: &str,
        values: &ParamValues<'_>,
        result_format: ResultFormat,
    ) -> TokioPostgresResult {
        if result_format != ResultFormat::Binary {
            return TokioPostgresResult::failed(
                "text result format is not supported by this driver".to_string(),
            );
        }
        let Some(client) = &self.client else {
            return TokioPostgresResult::failed("no connection to the server".to_string());
        };

        match run(client, query, values).await {
            Ok(result) => result,
            Err(e) => {
                let message = error_text(&e);
                self.error_message = Some(message.clone());
                TokioPostgresResult::failed(message)
            }
        }
    }

    async fn finish(&mut self) {
        // Dropping the client makes the connection task send Terminate and exit.
        drop(self.client.take());
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "PostgreSQL connection task did not shut down cleanly");
            }
        }
        debug!("PostgreSQL session finished");
    }
}

async fn run(
    client: &Client,
    query: &str,
    values: &ParamValues<'_>,
) -> Result<TokioPostgresResult, tokio_postgres::Error> {
    let statement = client.prepare(query).await?;
    let params: Vec<TextParam<'_>> = values.iter().map(TextParam).collect();

    let stream = client.query_raw(&statement, params).await?;
    pin_mut!(stream);
    let mut rows = Vec::new();
    while let Some(row) = stream.try_next().await? {
        rows.push(row);
    }
    let rows_affected = stream.rows_affected();

    let status = classify(!statement.columns().is_empty(), rows_affected);

    Ok(TokioPostgresResult {
        status,
        error_message: None,
        statement: Some(statement),
        rows,
        rows_affected,
    })
}

/// Statements with a row description return tuples; otherwise a command tag
/// means the command ran, and neither means the query text was empty.
fn classify(has_columns: bool, rows_affected: Option<u64>) -> ExecStatus {
    if has_columns {
        ExecStatus::TuplesOk
    } else if rows_affected.is_some() {
        ExecStatus::CommandOk
    } else {
        ExecStatus::EmptyQuery
    }
}

/// Result handle holding the rows of one tokio-postgres execution.
pub struct TokioPostgresResult {
    status: ExecStatus,
    error_message: Option<String>,
    statement: Option<Statement>,
    rows: Vec<Row>,
    rows_affected: Option<u64>,
}

impl TokioPostgresResult {
    fn failed(message: String) -> Self {
        Self {
            status: ExecStatus::FatalError,
            error_message: Some(message),
            statement: None,
            rows: Vec::new(),
            rows_affected: None,
        }
    }
}

impl ResultHandle for TokioPostgresResult {
    fn status(&self) -> ExecStatus {
        self.status
    }

    fn error_message(&self) -> Option<String> {
        self.error_message.clone()
    }

    fn ntuples(&self) -> usize {
        self.rows.len()
    }

    fn nfields(&self) -> usize {
        self.statement.as_ref().map_or(0, |s| s.columns().len())
    }

    fn field_name(&self, column: usize) -> Option<&str> {
        self.statement.as_ref()?.columns().get(column).map(|c| c.name())
    }

    fn field_type(&self, column: usize) -> Option<u32> {
        self.statement
            .as_ref()?
            .columns()
            .get(column)
            .map(|c| c.type_().oid())
    }

    fn value(&self, row: usize, column: usize) -> Option<&[u8]> {
        let row = self.rows.get(row)?;
        if column >= row.len() {
            return None;
        }
        row.try_get::<_, Option<RawValue<'_>>>(column)
            .ok()
            .flatten()
            .map(|raw| raw.0)
    }

    fn rows_affected(&self) -> Option<u64> {
        self.rows_affected
    }
}

/// Parameter sent in text format so the server parses it per the inferred type.
#[derive(Debug)]
struct TextParam<'a>(&'a CStr);

impl ToSql for TextParam<'_> {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        out.extend_from_slice(self.0.to_bytes());
        Ok(IsNull::No)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    to_sql_checked!();
}

/// Binary field bytes, whatever the column type.
struct RawValue<'a>(&'a [u8]);

impl<'a> FromSql<'a> for RawValue<'a> {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        Ok(RawValue(raw))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Empty settings fields fall back to tokio-postgres defaults.
fn build_config(settings: &ConnectionSettings) -> Result<Config, String> {
    let mut config = Config::new();
    if !settings.host.is_empty() {
        config.host(&settings.host);
    }
    if !settings.port.is_empty() {
        let port: u16 = settings.port.trim().parse().map_err(|_| {
            format!(
                "invalid integer value \"{}\" for connection option \"port\"",
                settings.port
            )
        })?;
        config.port(port);
    }
    if !settings.options.is_empty() {
        config.options(&settings.options);
    }
    if !settings.database.is_empty() {
        config.dbname(&settings.database);
    }
    if !settings.user.is_empty() {
        config.user(&settings.user);
    }
    if !settings.password.is_empty() {
        config.password(&settings.password);
    }
    Ok(config)
}

fn error_text(e: &tokio_postgres::Error) -> String {
    match e.as_db_error() {
        Some(db) => db.to_string(),
        None => e.to_string(),
    }
}
