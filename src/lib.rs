// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! FileIO is a unified file access layer to read, write, list, glob and copy
//! files on local disk, S3-compatible object stores, Google Cloud Storage and
//! Azure Blob Storage — blocking or async — behind one path based API.
//!
//! - Services: all supported services could be found at [`services`].
//! - Layers: all builtin layers could be found at [`layers`].
//!
//! # Quick Start
//!
//! ```no_run
//! use fileio::layers::LoggingLayer;
//! use fileio::services;
//! use fileio::Operator;
//! use fileio::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Pick a builder and configure it.
//!     let mut builder = services::S3::default();
//!     builder.bucket("test");
//!
//!     // Init an operator
//!     let op = Operator::new(builder)?
//!         // Init with logging layer enabled.
//!         .layer(LoggingLayer::default())
//!         .finish();
//!
//!     // Write data
//!     op.write("hello.txt", "Hello, World!").await?;
//!
//!     // Read data
//!     let bs = op.read("hello.txt").await?;
//!
//!     // Fetch metadata
//!     let meta = op.stat("hello.txt").await?;
//!     let mode = meta.mode();
//!     let length = meta.content_length();
//!
//!     // Delete
//!     op.delete("hello.txt").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # URI dispatch
//!
//! Backends can also be constructed from a URI, the scheme picking the
//! service out of the global registry:
//!
//! ```no_run
//! use fileio::Operator;
//! use fileio::Result;
//!
//! fn main() -> Result<()> {
//!     let op = Operator::from_uri("memory:///", vec![])?;
//!     Ok(())
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]
// Deny unused qualifications.
#![deny(unused_qualifications)]

// Private module with public types, they will be accessed via `fileio::Xxxx`
mod types;
pub use types::*;

// Public modules, they will be accessed like `fileio::layers::Xxxx`
pub mod codec;
pub mod layers;
pub mod raw;
pub mod services;

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::*;

    /// This is not a real test case.
    ///
    /// We assert our public structs here to make sure we don't introduce
    /// unexpected struct/enum size change.
    #[test]
    fn assert_size() {
        assert_eq!(24, size_of::<Operator>());
        assert_eq!(1, size_of::<EntryMode>());
        assert_eq!(24, size_of::<Scheme>());
    }
}
