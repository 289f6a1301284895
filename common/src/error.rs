use thiserror::Error;

/// Errors surfaced by the address math and the OS neighbor-table access.
///
/// A probe that never hears back and a neighbor-table line that does not
/// parse are deliberately *not* represented here — both are ordinary
/// outcomes of a sweep, not failures.
#[derive(Error, Debug)]
pub enum NetError {
    #[error("prefix length {0} is out of range (expected 0..=32)")]
    InvalidPrefix(u8),

    #[error("malformed CIDR notation: {0:?}")]
    InvalidCidr(String),

    #[error("malformed IPv4 address: {0:?}")]
    InvalidAddress(String),

    /// The OS neighbor-table query itself failed (missing tool, permission,
    /// interface down). Callers log this and carry on; the next sweep or
    /// tick retries naturally.
    #[error("neighbor table query failed: {0}")]
    QueryFailure(String),
}

pub type Result<T> = std::result::Result<T, NetError>;
