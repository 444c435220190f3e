use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc::Receiver;

use crate::error::{AuditError, Result};
use crate::filter::{contains_match, FilterState};
use crate::loader::PagedView;
use crate::models::{BalanceEntry, Columnar, LedgerEntry, VoucherRow};
use crate::reconciler::{self, Discrepancy, ReconcileOutcome};
use crate::store::Store;
use crate::voucher::{self, VoucherView};

/// The three logical views an auditor works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Journal,
    Balance,
    Voucher,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Journal => "journal",
            View::Balance => "balance",
            View::Voucher => "voucher",
        }
    }
}

impl FromStr for View {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "journal" => Ok(View::Journal),
            "balance" => Ok(View::Balance),
            "voucher" => Ok(View::Voucher),
            other => Err(AuditError::UnknownTable(other.to_string())),
        }
    }
}

/// One auditing session: the store plus explicit per-view working sets and
/// filter state. Everything the UI consumes goes through here.
///
/// The journal view pages in from the store; the balance view is loaded in
/// full (it is bounded by the chart of accounts); the voucher view is
/// transient, rebuilt by `build_voucher`.
pub struct Session {
    store: Store,
    journal: PagedView<LedgerEntry>,
    journal_filter: FilterState<LedgerEntry>,
    balance: Vec<BalanceEntry>,
    balance_filter: FilterState<BalanceEntry>,
    voucher: VoucherView,
    voucher_filter: FilterState<VoucherRow>,
}

impl Session {
    pub fn open(db_path: &Path) -> Result<Self> {
        Ok(Self::from_store(Store::open(db_path)?))
    }

    /// Attach an external snapshot instead of the working database.
    pub fn open_snapshot(db_path: &Path) -> Result<Self> {
        Ok(Self::from_store(Store::open_snapshot(db_path)?))
    }

    pub fn from_store(store: Store) -> Self {
        Self {
            store,
            journal: PagedView::new(),
            journal_filter: FilterState::new(),
            balance: Vec::new(),
            balance_filter: FilterState::new(),
            voucher: VoucherView::default(),
            voucher_filter: FilterState::new(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Load the next window of the view's working set. The journal pages in
    /// `PAGE_SIZE` rows at a time; the balance table loads in full; the
    /// voucher view has no store backing, so this is a no-op for it.
    pub fn load_page(&mut self, view: View) -> Result<usize> {
        match view {
            View::Journal => self.journal.load_next_page(&self.store),
            View::Balance => {
                self.balance = self.store.page(None, 0)?;
                Ok(self.balance.len())
            }
            View::Voucher => Ok(0),
        }
    }

    /// Replace the journal table wholesale. Invalidates the journal view's
    /// filter state and reloads the first page.
    pub fn replace_journal(&mut self, rows: &[LedgerEntry]) -> Result<usize> {
        self.store.replace_table(rows)?;
        self.journal_filter.reset();
        self.journal.reset();
        self.journal.load_next_page(&self.store)
    }

    /// Replace the balance table wholesale. Invalidates the balance view's
    /// filter state and reloads in full.
    pub fn replace_balance(&mut self, rows: &[BalanceEntry]) -> Result<usize> {
        self.store.replace_table(rows)?;
        self.balance_filter.reset();
        self.load_page(View::Balance)
    }

    /// Drop a view's working set and filter state without touching the
    /// store. `load_page` starts over afterwards.
    pub fn clear_view(&mut self, view: View) {
        match view {
            View::Journal => {
                self.journal.reset();
                self.journal_filter.reset();
            }
            View::Balance => {
                self.balance.clear();
                self.balance_filter.reset();
            }
            View::Voucher => {
                self.voucher = VoucherView::default();
                self.voucher_filter.reset();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Filtering
    // -----------------------------------------------------------------------

    /// Apply one substring predicate to a view. The first filter in a chain
    /// re-queries the full persisted table (not just the pages loaded so
    /// far); later filters narrow the in-memory cache. Returns the number of
    /// rows now visible.
    pub fn apply_filter(&mut self, view: View, column: &str, text: &str) -> Result<usize> {
        let needle = text.trim();
        if needle.is_empty() {
            return Err(AuditError::EmptyPredicate(view.name().to_string()));
        }
        match view {
            View::Journal => {
                if self.journal_filter.is_filtered() {
                    self.journal_filter.narrow(view.name(), column, needle)
                } else {
                    let rows: Vec<LedgerEntry> = self.store.filter_contains(column, needle)?;
                    let count = rows.len();
                    self.journal_filter.push(rows);
                    Ok(count)
                }
            }
            View::Balance => {
                if self.balance_filter.is_filtered() {
                    self.balance_filter.narrow(view.name(), column, needle)
                } else {
                    let rows: Vec<BalanceEntry> = self.store.filter_contains(column, needle)?;
                    let count = rows.len();
                    self.balance_filter.push(rows);
                    Ok(count)
                }
            }
            // The voucher view is not persisted; its whole chain, first step
            // included, narrows the in-memory rows.
            View::Voucher => {
                if self.voucher_filter.is_filtered() {
                    self.voucher_filter.narrow(view.name(), column, needle)
                } else {
                    let idx = VoucherRow::column_index(column).ok_or_else(|| {
                        AuditError::UnknownColumn {
                            table: view.name().to_string(),
                            column: column.to_string(),
                        }
                    })?;
                    let rows = contains_match(&self.voucher.rows, idx, needle);
                    let count = rows.len();
                    self.voucher_filter.push(rows);
                    Ok(count)
                }
            }
        }
    }

    /// Discard the most recent filter result for the view, restoring the one
    /// before it. At least one filtered snapshot must remain.
    pub fn undo_filter(&mut self, view: View) -> Result<usize> {
        match view {
            View::Journal => Ok(self.journal_filter.undo(view.name())?.len()),
            View::Balance => Ok(self.balance_filter.undo(view.name())?.len()),
            View::Voucher => Ok(self.voucher_filter.undo(view.name())?.len()),
        }
    }

    /// Back to UNFILTERED, with a fresh load from the store for store-backed
    /// views. Calling it on an already-unfiltered view is harmless.
    pub fn clear_filter(&mut self, view: View) -> Result<()> {
        match view {
            View::Journal => {
                self.journal_filter.reset();
                self.journal.reset();
                self.journal.load_next_page(&self.store)?;
            }
            View::Balance => {
                self.balance_filter.reset();
                self.load_page(View::Balance)?;
            }
            View::Voucher => {
                self.voucher_filter.reset();
            }
        }
        Ok(())
    }

    pub fn filter_depth(&self, view: View) -> usize {
        match view {
            View::Journal => self.journal_filter.depth(),
            View::Balance => self.balance_filter.depth(),
            View::Voucher => self.voucher_filter.depth(),
        }
    }

    // -----------------------------------------------------------------------
    // Visible rows
    // -----------------------------------------------------------------------

    pub fn journal_rows(&self) -> &[LedgerEntry] {
        self.journal_filter.cache().unwrap_or(&self.journal.rows)
    }

    pub fn balance_rows(&self) -> &[BalanceEntry] {
        self.balance_filter.cache().unwrap_or(&self.balance)
    }

    pub fn voucher_rows(&self) -> &[VoucherRow] {
        self.voucher_filter.cache().unwrap_or(&self.voucher.rows)
    }

    pub fn voucher_view(&self) -> &VoucherView {
        &self.voucher
    }

    // -----------------------------------------------------------------------
    // Cross-checks and drill-down
    // -----------------------------------------------------------------------

    /// Synchronous reconciliation; empty report means the books match.
    pub fn reconcile(&self) -> Result<Vec<Discrepancy>> {
        reconciler::run(&self.store)
    }

    /// Reconciliation on a worker thread; the outcome arrives on the
    /// returned channel and the session stays usable meanwhile.
    pub fn reconcile_in_background(&self) -> Result<Receiver<ReconcileOutcome>> {
        reconciler::spawn(&self.store)
    }

    /// Rebuild the voucher view for one `(voucher_id, date)` key. Replaces
    /// the previous voucher view and its filter state.
    pub fn build_voucher(&mut self, voucher_id: &str, date: &str) -> Result<&VoucherView> {
        let view = voucher::build(&self.store, voucher_id, date)?;
        self.voucher_filter.reset();
        self.voucher = view;
        Ok(&self.voucher)
    }

    /// Load every journal row for one account code into the journal view.
    /// An empty result is valid. Paging is suspended until the view is
    /// cleared or reloaded.
    pub fn drill_down_by_account(&mut self, account_code: &str) -> Result<&[LedgerEntry]> {
        let rows = voucher::drill_down(&self.store, account_code)?;
        self.journal_filter.reset();
        self.journal.adopt(rows);
        Ok(&self.journal.rows)
    }
}
