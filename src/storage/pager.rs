//! Pager implementation.
//!
//! The pager owns the backing file and maps page numbers to in-memory
//! buffers. Pages are loaded on demand, cached for the lifetime of the
//! process, mutated in place by the layers above, and written back in full
//! at orderly shutdown. There are no partial-page writes.

use crate::error::{DbError, Result};
use crate::page::PageBuf;
use crate::types::{PageId, PAGE_SIZE, TABLE_MAX_PAGES};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// File-backed page store
#[derive(Debug)]
pub struct Pager {
    /// The database file
    file: File,
    /// Pages currently on disk, derived from the file length
    pages_on_disk: usize,
    /// Highest page number handed out plus one
    num_pages: usize,
    /// Page cache, indexed by page number
    cache: Vec<Option<Box<PageBuf>>>,
}

impl Pager {
    /// Open or create a database file.
    ///
    /// Fails with corruption if the file length is not a whole number of
    /// pages.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(DbError::corruption(
                "db file is not a whole number of pages",
            ));
        }
        let pages_on_disk = (file_length / PAGE_SIZE as u64) as usize;

        let mut cache = Vec::with_capacity(TABLE_MAX_PAGES);
        cache.resize_with(TABLE_MAX_PAGES, || None);

        Ok(Self {
            file,
            pages_on_disk,
            num_pages: pages_on_disk,
            cache,
        })
    }

    /// Number of pages that belong to the table
    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Get the in-memory buffer for a page, loading or creating it.
    ///
    /// Reads the page from the file if it is within the file's current
    /// extent; otherwise the page starts zero-filled and the apparent file
    /// length grows to cover it. The buffer stays cached until shutdown.
    pub fn get_page(&mut self, page_id: PageId) -> Result<&mut PageBuf> {
        let index = page_id.index();
        if index >= TABLE_MAX_PAGES {
            return Err(DbError::PageOutOfBounds(page_id));
        }

        if self.cache[index].is_none() {
            let mut page = Box::new(PageBuf::new());

            if index < self.pages_on_disk {
                self.file
                    .seek(SeekFrom::Start(page_id.file_offset(PAGE_SIZE)))?;
                self.file.read_exact(page.as_bytes_mut())?;
            }

            self.cache[index] = Some(page);
            if index >= self.num_pages {
                self.num_pages = index + 1;
            }
        }

        let page = self.cache[index].as_mut().expect("page cached above");
        Ok(&mut **page)
    }

    /// Write every resident page back to the file and sync.
    ///
    /// Pages are always written in full; pages that were never loaded are
    /// already on disk and are left untouched.
    pub fn flush_all(&mut self) -> Result<()> {
        for index in 0..self.num_pages {
            if let Some(page) = &self.cache[index] {
                let offset = PageId::new(index as u32).file_offset(PAGE_SIZE);
                self.file.seek(SeekFrom::Start(offset))?;
                self.file.write_all(page.as_bytes())?;
            }
        }
        self.file.sync_all()?;
        Ok(())
    }
}
