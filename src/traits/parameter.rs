use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// A value that can be bound to a positional placeholder.
///
/// Parameters are sent in text format and the server infers their types, so
/// the rendering must be something Postgres accepts as input for the target
/// column type. Embedded NUL bytes end the value.
pub trait Parameter {
    /// Renders the value as the text sent on the wire.
    fn to_sql_text(&self) -> String;
}

impl<T: Parameter + ?Sized> Parameter for &T {
    fn to_sql_text(&self) -> String {
        (**self).to_sql_text()
    }
}

impl Parameter for str {
    fn to_sql_text(&self) -> String {
        self.to_string()
    }
}

impl Parameter for String {
    fn to_sql_text(&self) -> String {
        self.clone()
    }
}

impl Parameter for char {
    fn to_sql_text(&self) -> String {
        self.to_string()
    }
}

impl Parameter for bool {
    fn to_sql_text(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

macro_rules! display_parameter {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Parameter for $ty {
                fn to_sql_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_parameter!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_parameter {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Parameter for $ty {
                fn to_sql_text(&self) -> String {
                    if self.is_nan() {
                        "NaN".to_string()
                    } else if self.is_infinite() {
                        let text = if self.is_sign_positive() { "Infinity" } else { "-Infinity" };
                        text.to_string()
                    } else {
                        self.to_string()
                    }
                }
            }
        )*
    };
}

float_parameter!(f32, f64);

impl Parameter for NaiveDate {
    fn to_sql_text(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl Parameter for NaiveTime {
    fn to_sql_text(&self) -> String {
        self.format("%H:%M:%S%.f").to_string()
    }
}

impl Parameter for NaiveDateTime {
    fn to_sql_text(&self) -> String {
        self.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}

impl<Tz: TimeZone> Parameter for DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn to_sql_text(&self) -> String {
        self.to_rfc3339()
    }
}
