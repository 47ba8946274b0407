//! Table layer: the single-relation store.
//!
//! The table owns the pager exclusively and is the entry point for insert
//! and scan. The tree is currently one root leaf on page 0; internal nodes
//! are reserved in the format but never allocated.

mod cursor;

pub use cursor::Cursor;

use crate::error::Result;
use crate::page::LeafNode;
use crate::row::Row;
use crate::storage::Pager;
use crate::types::{
    PageId, COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE,
    LEAF_NODE_MAX_CELLS, LEAF_NODE_SPACE_FOR_CELLS, ROW_SIZE,
};
use std::fmt;
use std::path::Path;

/// The logical single-relation store
#[derive(Debug)]
pub struct Table {
    pub(crate) pager: Pager,
    pub(crate) root_page: PageId,
}

impl Table {
    /// Open or create the table backed by the given file.
    ///
    /// A zero-length file gets page 0 initialized as the empty root leaf;
    /// an existing file must already hold a recognizable leaf there.
    pub fn open(path: &Path) -> Result<Self> {
        let mut pager = Pager::open(path)?;
        let root_page = PageId::new(0);

        if pager.num_pages() == 0 {
            let page = pager.get_page(root_page)?;
            LeafNode::init(page, true);
        } else {
            // Surfaces corruption early rather than on first use.
            let page = pager.get_page(root_page)?;
            LeafNode::new(page)?;
        }

        Ok(Self { pager, root_page })
    }

    /// Insert a row, keyed by its id.
    ///
    /// Surfaces `DuplicateKey` and `TableFull` from the leaf unchanged.
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        let page = self.pager.get_page(self.root_page)?;
        let mut leaf = LeafNode::new(page)?;
        leaf.insert(row.id, row)?;
        Ok(())
    }

    /// Point lookup by id
    pub fn find(&mut self, id: u32) -> Result<Option<Row>> {
        let page = self.pager.get_page(self.root_page)?;
        let leaf = LeafNode::new(page)?;
        Ok(leaf.find(id).ok().map(|index| leaf.row(index)))
    }

    /// Number of rows in the table, derived from the leaf's cell count
    pub fn row_count(&mut self) -> Result<u32> {
        let page = self.pager.get_page(self.root_page)?;
        let leaf = LeafNode::new(page)?;
        Ok(leaf.cell_count())
    }

    /// Start a full-table scan at the first cell
    pub fn cursor(&mut self) -> Result<Cursor<'_>> {
        Cursor::start(self)
    }

    /// Collect every row in ascending key order
    pub fn select(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        let mut cursor = self.cursor()?;
        while !cursor.end_of_table() {
            rows.push(cursor.current_row()?);
            cursor.advance()?;
        }
        Ok(rows)
    }

    /// Export the tree structure for rendering.
    ///
    /// A direct structural dump of the root leaf: its cell count and the
    /// `(index, key)` pairs in ascending order.
    pub fn export_tree(&mut self) -> Result<TreeDump> {
        let page = self.pager.get_page(self.root_page)?;
        let leaf = LeafNode::new(page)?;

        Ok(TreeDump {
            leaf_size: leaf.cell_count(),
            keys: leaf.iter().map(|(key, _)| key).collect(),
        })
    }

    /// Flush all pages to disk and release the table
    pub fn close(mut self) -> Result<()> {
        self.pager.flush_all()
    }
}

/// Structural dump of the root leaf, for diagnostic rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDump {
    /// Cell count of the leaf
    pub leaf_size: u32,
    /// Keys by ascending cell index
    pub keys: Vec<u32>,
}

impl fmt::Display for TreeDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tree:")?;
        writeln!(f, "  Leaf size: {}", self.leaf_size)?;
        for (index, key) in self.keys.iter().enumerate() {
            writeln!(f, "    {} : {}", index, key)?;
        }
        Ok(())
    }
}

/// The six invariant sizes of the on-disk format.
///
/// A literal constant dump so callers can assert the binary layout without
/// parsing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConstants {
    pub row_size: usize,
    pub common_node_header_size: usize,
    pub leaf_node_header_size: usize,
    pub leaf_node_cell_size: usize,
    pub leaf_node_space_for_cells: usize,
    pub leaf_node_max_cells: usize,
}

impl LayoutConstants {
    /// The layout of the current format
    pub const fn get() -> Self {
        Self {
            row_size: ROW_SIZE,
            common_node_header_size: COMMON_NODE_HEADER_SIZE,
            leaf_node_header_size: LEAF_NODE_HEADER_SIZE,
            leaf_node_cell_size: LEAF_NODE_CELL_SIZE,
            leaf_node_space_for_cells: LEAF_NODE_SPACE_FOR_CELLS,
            leaf_node_max_cells: LEAF_NODE_MAX_CELLS,
        }
    }
}

impl fmt::Display for LayoutConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Constants: ")?;
        writeln!(f, "Row Size: {}", self.row_size)?;
        writeln!(f, "Common Node Header size: {}", self.common_node_header_size)?;
        writeln!(f, "Leaf Node Header Size: {}", self.leaf_node_header_size)?;
        writeln!(f, "Leaf Node Cell Size: {}", self.leaf_node_cell_size)?;
        writeln!(f, "Leaf Node Space For Cells: {}", self.leaf_node_space_for_cells)?;
        writeln!(f, "Leaf Node Max Cell: {}", self.leaf_node_max_cells)?;
        Ok(())
    }
}
