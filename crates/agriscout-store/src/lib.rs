//! AgriScout Store - Field storage port and adapters
//!
//! This crate defines the `FieldStore` port holding lands, partitions and
//! the current selection, and provides the in-memory adapter.

pub mod memory;
pub mod ports;

pub use memory::MemoryFieldStore;
pub use ports::FieldStore;
