/// Outcome reported by the protocol layer for one executed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecStatus {
    EmptyQuery,
    CommandOk,
    TuplesOk,
    CopyOut,
    CopyIn,
    BadResponse,
    NonfatalError,
    FatalError,
    CopyBoth,
    SingleTuple,
}

impl ExecStatus {
    /// Only `CommandOk` and `TuplesOk` count as a successful execution.
    pub fn is_success(self) -> bool {
        matches!(self, ExecStatus::CommandOk | ExecStatus::TuplesOk)
    }
}

/// State of a native session handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Ok,
    Bad,
}

/// Format requested for result values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ResultFormat {
    Text = 0,
    Binary = 1,
}
