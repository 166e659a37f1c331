//! Corpus construction and representation
//!
//! This module provides the mutable builder used while reading links and the
//! immutable CSR link graph both ranking algorithms consume.

pub mod builder;
pub mod csr;
