//! # JSON Storage Module
//!
//! File-based persistence for the bill splitter: the entire session is one
//! JSON document (`session.json`) in a data directory. The layout matches
//! sessions saved by earlier builds, so existing files load unchanged.

pub mod connection;
pub mod session_repository;

pub use connection::JsonConnection;
pub use session_repository::SessionRepository;
