//! Storage layer: disk I/O and page management.
//!
//! The backing file is exactly a concatenation of 4096-byte pages; page `n`
//! lives at byte offset `n * 4096`. There is no file header page and no
//! free list.

mod pager;

pub use pager::Pager;
