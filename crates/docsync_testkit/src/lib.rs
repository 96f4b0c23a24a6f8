//! # DocSync Testkit
//!
//! Test utilities for DocSync.
//!
//! This crate provides:
//! - Ready-made server and store fixtures
//! - A spying store wrapper for asserting persistence is never reached
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use docsync_testkit::prelude::*;
//! use docsync_protocol::PutDocParams;
//!
//! let server = allow_all_server();
//! let params = PutDocParams::new("postType/post", "7", 0, "doc", true);
//! assert!(server.put_document(&params).unwrap().success);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
