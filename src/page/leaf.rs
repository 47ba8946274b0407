//! Leaf node layout.
//!
//! A leaf page holds the 10-byte leaf header followed by a sorted-by-key
//! array of fixed-width cells. Each cell is a 4-byte little-endian key plus
//! a 293-byte serialized row. Cells are kept sorted on insert, so lookup,
//! duplicate detection, and ordered iteration all come from the one array.

use crate::error::{DbError, Result};
use crate::page::{NodeHeader, PageBuf};
use crate::row::Row;
use crate::types::{
    LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_KEY_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_NUM_CELLS_OFFSET, LEAF_NODE_NUM_CELLS_SIZE, LEAF_NODE_VALUE_OFFSET,
    LEAF_NODE_VALUE_SIZE,
};

/// A typed view over a page interpreted as a leaf node.
///
/// The view borrows the page buffer for the duration of one operation; it
/// is never retained across operations.
pub struct LeafNode<'a> {
    page: &'a mut PageBuf,
}

impl<'a> LeafNode<'a> {
    /// Interpret an existing page as a leaf.
    ///
    /// Fails with corruption if the page header does not describe a leaf
    /// node.
    pub fn new(page: &'a mut PageBuf) -> Result<Self> {
        let header = NodeHeader::read(page)
            .ok_or_else(|| DbError::corruption("unrecognized node type byte"))?;
        if !header.node_type.is_leaf() {
            return Err(DbError::corruption(format!(
                "expected leaf node, found {:?}",
                header.node_type
            )));
        }
        Ok(Self { page })
    }

    /// Initialize a zeroed page as an empty leaf and return the view
    pub fn init(page: &'a mut PageBuf, is_root: bool) -> Self {
        NodeHeader::new_leaf(is_root).write(page);
        Self { page }
    }

    /// Number of cells currently stored in this leaf
    pub fn cell_count(&self) -> u32 {
        u32::from_le_bytes(
            self.page[LEAF_NODE_NUM_CELLS_OFFSET
                ..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
                .try_into()
                .expect("cell count slice is 4 bytes"),
        )
    }

    fn set_cell_count(&mut self, count: u32) {
        self.page[LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
            .copy_from_slice(&count.to_le_bytes());
    }

    /// Whether this leaf is the tree root
    pub fn is_root(&self) -> bool {
        NodeHeader::read(self.page)
            .map(|h| h.is_root)
            .unwrap_or(false)
    }

    /// Byte offset of cell `index` within the page
    fn cell_offset(index: usize) -> usize {
        LEAF_NODE_HEADER_SIZE + index * LEAF_NODE_CELL_SIZE
    }

    /// Key of the cell at `index`
    pub fn key(&self, index: usize) -> u32 {
        let offset = Self::cell_offset(index);
        u32::from_le_bytes(
            self.page[offset..offset + LEAF_NODE_KEY_SIZE]
                .try_into()
                .expect("key slice is 4 bytes"),
        )
    }

    /// Serialized row bytes of the cell at `index`
    pub fn row_bytes(&self, index: usize) -> &[u8] {
        let offset = Self::cell_offset(index) + LEAF_NODE_VALUE_OFFSET;
        &self.page[offset..offset + LEAF_NODE_VALUE_SIZE]
    }

    /// Decoded row of the cell at `index`
    pub fn row(&self, index: usize) -> Row {
        Row::deserialize(self.row_bytes(index))
    }

    /// Binary search for `key` over the sorted cell array.
    ///
    /// Returns `Ok(index)` if the key is present, `Err(index)` with the
    /// insertion point that keeps the array sorted otherwise.
    pub fn find(&self, key: u32) -> std::result::Result<usize, usize> {
        let mut lo = 0usize;
        let mut hi = self.cell_count() as usize;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let mid_key = self.key(mid);
            if mid_key == key {
                return Ok(mid);
            } else if mid_key < key {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        Err(lo)
    }

    /// Insert a cell at its sorted position.
    ///
    /// Fails with `DuplicateKey` if the key is already present and with
    /// `TableFull` at capacity; splitting is not implemented, so a full
    /// leaf is a terminal condition. Returns the insertion index.
    pub fn insert(&mut self, key: u32, row: &Row) -> Result<usize> {
        let count = self.cell_count() as usize;

        let index = match self.find(key) {
            Ok(_) => return Err(DbError::DuplicateKey(key)),
            Err(index) => index,
        };

        if count >= LEAF_NODE_MAX_CELLS {
            return Err(DbError::TableFull);
        }

        // Shift trailing cells one slot right to open the gap.
        if index < count {
            let src = Self::cell_offset(index);
            let end = Self::cell_offset(count);
            self.page
                .copy_within(src..end, src + LEAF_NODE_CELL_SIZE);
        }

        let offset = Self::cell_offset(index);
        self.page[offset..offset + LEAF_NODE_KEY_SIZE].copy_from_slice(&key.to_le_bytes());
        row.serialize(
            &mut self.page
                [offset + LEAF_NODE_VALUE_OFFSET..offset + LEAF_NODE_VALUE_OFFSET + LEAF_NODE_VALUE_SIZE],
        );

        self.set_cell_count(count as u32 + 1);
        Ok(index)
    }

    /// Iterate over `(key, row)` pairs in ascending key order.
    ///
    /// Re-derived from the page each call; there is no cached iterator
    /// state.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Row)> + '_ {
        (0..self.cell_count() as usize).map(move |i| (self.key(i), self.row(i)))
    }
}
