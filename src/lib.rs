//! # simpledb
//!
//! A single-table, disk-backed relational store with a line-oriented
//! command interpreter.
//!
//! ## Architecture
//!
//! The crate is composed of small layered components:
//!
//! - **Types** (`types`): page identifiers and the on-disk layout constants
//! - **Row Codec** (`row`): fixed-width binary serialization of the one row schema
//! - **Page Layer** (`page`): 4096-byte page buffers interpreted as tree nodes
//! - **Storage Layer** (`storage`): the pager owning the backing file
//! - **Table Layer** (`table`): insert, point lookup, and cursor-based scans
//! - **Interpreter** (`repl`): the `db > ` command loop and its text protocol
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simpledb::{Row, Table};
//!
//! let mut table = Table::open(Path::new("my_database.db"))?;
//!
//! table.insert(&Row::new(1, "alice", "alice@example.com")?)?;
//!
//! for row in table.select()? {
//!     println!("{row}");
//! }
//!
//! // Flush every page and close the file.
//! table.close()?;
//! ```
//!
//! The on-disk format is a bare concatenation of 4096-byte pages; the tree
//! is currently a single root leaf on page 0 holding up to 13 fixed-width
//! cells. Internal nodes are reserved in the header encoding so splitting
//! can be added without changing the `Table`/`Cursor` contracts.

pub mod error;
pub mod page;
pub mod repl;
pub mod row;
pub mod storage;
pub mod table;
pub mod types;

pub use error::{DbError, Result};
pub use row::Row;
pub use table::{Cursor, LayoutConstants, Table, TreeDump};
pub use types::{PageId, PAGE_SIZE};
