mod tokio_postgres;

pub use self::in_memory_test::{
    InMemoryTestDriver, InMemoryTestResponse, InMemoryTestResponseBuilder, InMemoryTestResult,
    InMemoryTestSession, RecordedQuery,
};
pub use self::tokio_postgres::{TokioPostgresDriver, TokioPostgresResult, TokioPostgresSession};
