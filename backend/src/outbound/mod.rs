//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel
//! - **memory**: mutex-guarded repositories used without a database
//! - **crypto**: bcrypt password hashing
//!
//! Adapters translate between domain types and their storage
//! representation; business rules stay in the domain services.

pub mod crypto;
pub mod memory;
pub mod persistence;
