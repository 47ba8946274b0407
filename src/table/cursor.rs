//! Cursor for full-table scans.
//!
//! A cursor is a traversal handle positioned at a cell index within a leaf
//! page. It advances in key order and signals end-of-table once past the
//! last cell. With a single root leaf, advancing never has to climb to a
//! parent; the position is just (page, cell index).

use crate::error::Result;
use crate::page::LeafNode;
use crate::row::Row;
use crate::table::Table;
use crate::types::PageId;

/// A traversal handle over the tree, in ascending key order
pub struct Cursor<'t> {
    table: &'t mut Table,
    page: PageId,
    cell: usize,
    end_of_table: bool,
}

impl<'t> Cursor<'t> {
    /// Position a cursor at the first cell of the table
    pub(crate) fn start(table: &'t mut Table) -> Result<Self> {
        let page = table.root_page;
        let cell_count = {
            let buf = table.pager.get_page(page)?;
            LeafNode::new(buf)?.cell_count()
        };

        Ok(Self {
            table,
            page,
            cell: 0,
            end_of_table: cell_count == 0,
        })
    }

    /// Whether the cursor has moved past the last cell
    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    /// Decode the row at the cursor's position.
    ///
    /// Must not be called once `end_of_table` is true.
    pub fn current_row(&mut self) -> Result<Row> {
        debug_assert!(!self.end_of_table);
        let buf = self.table.pager.get_page(self.page)?;
        let leaf = LeafNode::new(buf)?;
        Ok(leaf.row(self.cell))
    }

    /// Move to the next cell, setting end-of-table past the last one
    pub fn advance(&mut self) -> Result<()> {
        let buf = self.table.pager.get_page(self.page)?;
        let leaf = LeafNode::new(buf)?;

        self.cell += 1;
        if self.cell >= leaf.cell_count() as usize {
            self.end_of_table = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_row(id: u32) -> Row {
        Row::new(id, format!("user{id}"), format!("user{id}@email.com")).unwrap()
    }

    #[test]
    fn test_cursor_on_empty_table() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let mut table = Table::open(&path)?;

        let cursor = table.cursor()?;
        assert!(cursor.end_of_table());

        Ok(())
    }

    #[test]
    fn test_cursor_walks_all_rows_in_order() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let mut table = Table::open(&path)?;

        for id in [2, 3, 1] {
            table.insert(&sample_row(id))?;
        }

        let mut seen = Vec::new();
        let mut cursor = table.cursor()?;
        while !cursor.end_of_table() {
            seen.push(cursor.current_row()?.id);
            cursor.advance()?;
        }
        assert_eq!(seen, vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn test_scan_is_restartable() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let mut table = Table::open(&path)?;

        table.insert(&sample_row(1))?;
        table.insert(&sample_row(2))?;

        let first = table.select()?;
        let second = table.select()?;
        assert_eq!(first, second);

        Ok(())
    }
}
