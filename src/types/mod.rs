mod params;
mod row;
mod settings;
mod status;
mod value;

pub use params::{EncodedParams, ParamValues};
pub use row::{QueryResult, Row};
pub use settings::ConnectionSettings;
pub use status::{ExecStatus, ResultFormat, SessionStatus};
pub use value::{oid, Value};
