use thiserror::Error;

/// Failures converting wire payloads into native shapes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("invalid timestamp `{value}` in field `{field}`")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("unknown {kind} value: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}
