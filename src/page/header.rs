//! Node header structure.
//!
//! The header occupies the first bytes of every B-tree page and is the only
//! metadata needed to interpret the page.

use crate::types::{
    NodeType, IS_ROOT_OFFSET, LEAF_NODE_HEADER_SIZE, LEAF_NODE_NUM_CELLS_OFFSET,
    LEAF_NODE_NUM_CELLS_SIZE, NODE_TYPE_OFFSET, PARENT_POINTER_OFFSET, PARENT_POINTER_SIZE,
};

/// Node header structure
///
/// Layout (common header, 6 bytes, shared by every node kind):
/// ```text
/// Offset  Size  Description
/// 0       1     Node type (0x00 internal, 0x01 leaf)
/// 1       1     Is-root flag
/// 2       4     Parent page number (meaningless for the root)
/// ```
///
/// Leaf nodes add 4 bytes at offset 6:
/// ```text
/// 6       4     Number of cells on this page
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NodeHeader {
    /// Kind of this node
    pub node_type: NodeType,
    /// Whether this node is the tree root
    pub is_root: bool,
    /// Page number of the parent node
    pub parent: u32,
    /// Number of cells on this page (leaf nodes)
    pub cell_count: u32,
}

impl NodeHeader {
    /// Create a header for a fresh empty leaf
    pub fn new_leaf(is_root: bool) -> Self {
        Self {
            node_type: NodeType::Leaf,
            is_root,
            parent: 0,
            cell_count: 0,
        }
    }

    /// Read a node header from page bytes.
    ///
    /// Returns `None` if the node type byte is unrecognized; the caller
    /// treats that as corruption.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < LEAF_NODE_HEADER_SIZE {
            return None;
        }

        let node_type = NodeType::from_byte(bytes[NODE_TYPE_OFFSET])?;
        let is_root = bytes[IS_ROOT_OFFSET] != 0;
        let parent = u32::from_le_bytes(
            bytes[PARENT_POINTER_OFFSET..PARENT_POINTER_OFFSET + PARENT_POINTER_SIZE]
                .try_into()
                .ok()?,
        );
        let cell_count = if node_type.is_leaf() {
            u32::from_le_bytes(
                bytes[LEAF_NODE_NUM_CELLS_OFFSET
                    ..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
                    .try_into()
                    .ok()?,
            )
        } else {
            0
        };

        Some(Self {
            node_type,
            is_root,
            parent,
            cell_count,
        })
    }

    /// Write this header to page bytes
    pub fn write(&self, bytes: &mut [u8]) {
        bytes[NODE_TYPE_OFFSET] = self.node_type as u8;
        bytes[IS_ROOT_OFFSET] = self.is_root as u8;
        bytes[PARENT_POINTER_OFFSET..PARENT_POINTER_OFFSET + PARENT_POINTER_SIZE]
            .copy_from_slice(&self.parent.to_le_bytes());

        if self.node_type.is_leaf() {
            bytes[LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
                .copy_from_slice(&self.cell_count.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LEAF_NODE_HEADER_SIZE, PAGE_SIZE};

    #[test]
    fn test_header_roundtrip() {
        let header = NodeHeader {
            node_type: NodeType::Leaf,
            is_root: true,
            parent: 7,
            cell_count: 5,
        };

        let mut bytes = [0u8; LEAF_NODE_HEADER_SIZE];
        header.write(&mut bytes);

        let read = NodeHeader::read(&bytes).unwrap();
        assert_eq!(read.node_type, NodeType::Leaf);
        assert!(read.is_root);
        assert_eq!(read.parent, 7);
        assert_eq!(read.cell_count, 5);
    }

    #[test]
    fn test_zeroed_page_reads_as_empty_internal() {
        // A zero-filled page decodes as node type 0x00; the table layer is
        // responsible for initializing fresh pages as leaves before use.
        let bytes = [0u8; PAGE_SIZE];
        let read = NodeHeader::read(&bytes).unwrap();
        assert_eq!(read.node_type, NodeType::Internal);
    }

    #[test]
    fn test_unknown_node_type_rejected() {
        let mut bytes = [0u8; PAGE_SIZE];
        bytes[0] = 0x7F;
        assert!(NodeHeader::read(&bytes).is_none());
    }
}
