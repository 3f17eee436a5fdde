use thiserror::Error;

/// Unified error type for store operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// The store could not be reached (topology, I/O, authentication)
    #[error("Database unavailable: {message}")]
    Connection { message: String },

    /// A read or write against a collection was rejected by the server
    #[error("Database operation failed: {message}")]
    Query { message: String },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from mongodb::error::Error using the driver's error categorization
impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { message, .. } => DbError::Connection { message: message.clone() },
            ErrorKind::Authentication { message, .. } => DbError::Connection { message: message.clone() },
            ErrorKind::DnsResolve { message, .. } => DbError::Connection { message: message.clone() },
            ErrorKind::ConnectionPoolCleared { message, .. } => DbError::Connection { message: message.clone() },
            ErrorKind::Io(io_err) => DbError::Connection {
                message: io_err.to_string(),
            },
            ErrorKind::Command(_) | ErrorKind::Write(_) | ErrorKind::InvalidArgument { .. } => {
                DbError::Query { message: err.to_string() }
            }
            ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
                DbError::Query { message: err.to_string() }
            }
            // All other driver errors are non-recoverable - convert to anyhow
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
