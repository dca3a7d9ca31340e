//! Pagination context supplied by the host for index pages.

use serde::{Deserialize, Serialize};

use super::Site;

/// Placeholder for the page number in `site.paginate_path`.
const NUM_PLACEHOLDER: &str = ":num";

/// Current position in a paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paginator {
    /// Current page number (1-based).
    pub page: u64,
    pub total_pages: u64,
    pub previous_page_path: Option<String>,
    pub next_page_path: Option<String>,
}

impl Paginator {
    pub fn new(page: u64, total_pages: u64) -> Self {
        Self {
            page,
            total_pages,
            ..Self::default()
        }
    }

    /// Path of the previous page, explicit or derived from `paginate_path`.
    pub fn previous_path(&self, site: &Site) -> Option<String> {
        if let Some(path) = self.previous_page_path.as_deref().filter(|p| !p.is_empty()) {
            return Some(path.to_string());
        }
        if self.page <= 1 {
            return None;
        }
        page_path(site, self.page - 1)
    }

    /// Path of the next page, explicit or derived from `paginate_path`.
    pub fn next_path(&self, site: &Site) -> Option<String> {
        if let Some(path) = self.next_page_path.as_deref().filter(|p| !p.is_empty()) {
            return Some(path.to_string());
        }
        if self.page == 0 || self.page >= self.total_pages {
            return None;
        }
        page_path(site, self.page + 1)
    }
}

/// Path of page `num` according to `site.paginate_path`.
///
/// Page 1 is the listing root (`/`).
fn page_path(site: &Site, num: u64) -> Option<String> {
    let pattern = site.str("paginate_path")?;
    if !pattern.contains(NUM_PLACEHOLDER) {
        return None;
    }
    if num == 1 {
        return Some("/".into());
    }
    Some(pattern.replace(NUM_PLACEHOLDER, &num.to_string()))
}
