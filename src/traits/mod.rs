mod driver;
mod parameter;

pub use driver::{DatabaseDriver, ResultHandle, Session};
pub use parameter::Parameter;
