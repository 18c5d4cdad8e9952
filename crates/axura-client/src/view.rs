//! User table view model.
//!
//! [`derive`] turns the full user list plus the current [`ViewParameters`]
//! into the rows of one page and the number of rows that matched before
//! paging. It is a pure function: callers invoke it again whenever the
//! list or a parameter changes.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use axura_shared::constants::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use axura_shared::{SubscriptionStatus, UserRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown {kind} {value:?}, expected one of: {expected}")]
    UnknownValue {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("page size {0} is not offered (choose 5, 10, 25 or 50)")]
    PageSize(usize),
}

// ---------------------------------------------------------------------------
// Parameter enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterTab {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl FilterTab {
    fn admits(self, status: SubscriptionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Paid => status == SubscriptionStatus::Paid,
            Self::Unpaid => status == SubscriptionStatus::Unpaid,
        }
    }
}

impl FromStr for FilterTab {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "paid" => Ok(Self::Paid),
            "unpaid" => Ok(Self::Unpaid),
            _ => Err(ViewError::UnknownValue {
                kind: "filter tab",
                value: s.to_string(),
                expected: "all, paid, unpaid",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    Email,
    SubscriptionStatus,
}

impl SortField {
    /// Ascending comparison on this field. Name and email ignore case; the
    /// status compares its raw label.
    fn compare(self, a: &UserRecord, b: &UserRecord) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
            Self::SubscriptionStatus => a
                .subscription_status
                .label()
                .cmp(b.subscription_status.label()),
        }
    }
}

impl FromStr for SortField {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "status" | "subscriptionstatus" => Ok(Self::SubscriptionStatus),
            _ => Err(ViewError::UnknownValue {
                kind: "sort field",
                value: s.to_string(),
                expected: "name, email, status",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ViewError::UnknownValue {
                kind: "sort order",
                value: s.to_string(),
                expected: "asc, desc",
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

// ---------------------------------------------------------------------------
// ViewParameters
// ---------------------------------------------------------------------------

/// Filter, search, sort and paging state of the user table.
///
/// Fields are private so the paging invariants hold: a new filter tab,
/// search query or page size always sends the view back to page 0, and the
/// page size is always one of [`PAGE_SIZE_OPTIONS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParameters {
    filter_tab: FilterTab,
    search_query: String,
    sort_field: SortField,
    sort_order: SortOrder,
    page_index: usize,
    page_size: usize,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            filter_tab: FilterTab::All,
            search_query: String::new(),
            sort_field: SortField::Name,
            sort_order: SortOrder::Asc,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_tab(&self) -> FilterTab {
        self.filter_tab
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_filter_tab(&mut self, tab: FilterTab) {
        self.filter_tab = tab;
        self.page_index = 0;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.page_index = 0;
    }

    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sort_field = field;
        self.sort_order = order;
    }

    /// Column-header behaviour: the current field flips direction, a new
    /// field starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Any index is accepted; a page past the end simply renders empty.
    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ViewError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ViewError::PageSize(page_size));
        }
        self.page_size = page_size;
        self.page_index = 0;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// derive
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPage {
    /// Rows on the requested page, in display order.
    pub rows: Vec<UserRecord>,
    /// Rows that passed the tab filter and the search, before paging.
    pub total_matching: usize,
}

pub fn derive(all_users: &[UserRecord], params: &ViewParameters) -> DerivedPage {
    let query = params.search_query.to_lowercase();

    let mut matching: Vec<&UserRecord> = all_users
        .iter()
        .filter(|u| params.filter_tab.admits(u.subscription_status))
        .filter(|u| {
            query.is_empty()
                || u.name.to_lowercase().contains(&query)
                || u.email.to_lowercase().contains(&query)
        })
        .collect();

    // `sort_by` is stable: equal keys keep their input order in both
    // directions because only the comparison is reversed.
    matching.sort_by(|a, b| params.sort_order.apply(params.sort_field.compare(a, b)));

    let total_matching = matching.len();
    let start = params.page_index.saturating_mul(params.page_size);
    let rows = matching
        .into_iter()
        .skip(start)
        .take(params.page_size)
        .cloned()
        .collect();

    DerivedPage {
        rows,
        total_matching,
    }
}

/// Number of pages needed to show `total` rows, `page_size` at a time.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
