//! Application services.
//!
//! Services wrap side-effecting operations (file I/O) behind a small,
//! consistent interface so the compiler itself stays pure.

pub mod document;

pub use document::DocumentService;
