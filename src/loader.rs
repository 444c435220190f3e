use crate::error::Result;
use crate::models::TableRecord;
use crate::store::Store;

pub const PAGE_SIZE: usize = 100;

/// Working set for a paged view: rows fetched so far plus a sticky
/// end-of-data flag. Once a short page comes back, further load calls are
/// no-ops until the view is reset.
#[derive(Debug, Default)]
pub struct PagedView<T> {
    pub rows: Vec<T>,
    exhausted: bool,
}

impl<T: TableRecord> PagedView<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            exhausted: false,
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetch the next window from the store and append it. Returns how many
    /// rows were added.
    pub fn load_next_page(&mut self, store: &Store) -> Result<usize> {
        if self.exhausted {
            return Ok(0);
        }
        let page: Vec<T> = store.page(Some(PAGE_SIZE), self.rows.len())?;
        let got = page.len();
        if got < PAGE_SIZE {
            self.exhausted = true;
        }
        self.rows.extend(page);
        Ok(got)
    }

    pub fn reset(&mut self) {
        self.rows.clear();
        self.exhausted = false;
    }

    /// Replace the working set with rows that came from somewhere other than
    /// paging (drill-down). Paging stops until the view is reset.
    pub fn adopt(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.exhausted = true;
    }
}
