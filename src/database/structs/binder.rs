#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binder {
    pub value: String,
    /// Used in log lines when binding fails.
    pub name: String,
    /// Bind SQL NULL instead of an empty string.
    pub null_if_empty: bool,
}
