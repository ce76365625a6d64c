//! Error type shared by the entity repository ports.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by entity repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { message: String } => "unique constraint violated: {message}",
        /// A foreign key pointed at a row that does not exist.
        MissingReference { message: String } => "referenced row is missing: {message}",
    }
}
