//! Common types and on-disk layout constants.
//!
//! The constants below define the binary format of the backing file. They
//! are part of the persisted format: any change breaks compatibility with
//! existing database files.

mod page_id;

pub use page_id::PageId;

/// Page size in bytes (4KB), the unit of file I/O
pub const PAGE_SIZE: usize = 4096;

/// Maximum number of pages the pager will hand out.
///
/// Unreachable while the tree is a single root leaf, but the pager contract
/// keeps the bound so that adding node splits does not change it.
pub const TABLE_MAX_PAGES: usize = 100;

/// `id` column width in bytes
pub const ID_SIZE: usize = std::mem::size_of::<u32>();

/// `username` column payload capacity in bytes
pub const USERNAME_MAX: usize = 32;

/// `email` column payload capacity in bytes
pub const EMAIL_MAX: usize = 255;

/// `username` column width on disk (payload + NUL terminator)
pub const USERNAME_SIZE: usize = USERNAME_MAX + 1;

/// `email` column width on disk (payload + NUL terminator)
pub const EMAIL_SIZE: usize = EMAIL_MAX + 1;

/// Byte offset of `id` within a serialized row
pub const ID_OFFSET: usize = 0;

/// Byte offset of `username` within a serialized row
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;

/// Byte offset of `email` within a serialized row
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Serialized row width: 4 + 33 + 256 = 293 bytes
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

// Common node header: node type (1) + is-root flag (1) + parent pointer (4).
pub const NODE_TYPE_SIZE: usize = 1;
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = 1;
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = std::mem::size_of::<u32>();
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;

/// Common node header size: 6 bytes
pub const COMMON_NODE_HEADER_SIZE: usize =
    NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

// Leaf node header: common header + cell count (4).
pub const LEAF_NODE_NUM_CELLS_SIZE: usize = std::mem::size_of::<u32>();
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;

/// Leaf node header size: 10 bytes
pub const LEAF_NODE_HEADER_SIZE: usize =
    COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

// Leaf node body: a sorted array of fixed-width cells.
pub const LEAF_NODE_KEY_SIZE: usize = std::mem::size_of::<u32>();
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;

/// Leaf cell size: key + row = 297 bytes
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;

/// Usable cell space per leaf page: 4086 bytes
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;

/// Maximum cells per leaf: 13
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

/// Node kinds, encoded in the first header byte of every page.
///
/// `Internal` is reserved for when node splitting is implemented; it is
/// never written in the single-leaf configuration.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Internal node (separator keys + child pointers)
    Internal = 0x00,
    /// Leaf node (keys + serialized rows)
    Leaf = 0x01,
}

impl NodeType {
    /// Check if this is a leaf node type
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// Convert from byte value
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(Self::Internal),
            0x01 => Some(Self::Leaf),
            _ => None,
        }
    }
}
