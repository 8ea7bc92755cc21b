//! Length-aware pagination for the admin listings.
//!
//! Produces the page object the admin frontend consumes: item window,
//! first/last/prev/next URLs and a numbered link strip with `...` gaps.
//! Page URLs carry the active search term so paging keeps the filter.

use serde::Serialize;

/// Page size for admin listings.
pub const ADMIN_PER_PAGE: i64 = 5;

/// Pages shown on each side of the current page in the link strip.
const ON_EACH_SIDE: i64 = 3;

/// Below this many pages every page gets a link.
const SMALL_SLIDER_LIMIT: i64 = ON_EACH_SIDE * 2 + 8;

pub const PREVIOUS_LABEL: &str = "&laquo; Previous";
pub const NEXT_LABEL: &str = "Next &raquo;";
pub const GAP_LABEL: &str = "...";

/// Parse a `page` query value. Missing, malformed or non-positive input
/// resolves to page 1.
pub fn resolve_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Row offset of the first item on `page`.
pub fn offset(page: i64, per_page: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// Where a page lives and what it is filtered by.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    /// Absolute URL of the listing, without query string.
    pub path: &'a str,
    pub page: i64,
    pub per_page: i64,
    /// Normalized search term, re-attached to every page URL.
    pub search: Option<&'a str>,
}

impl PageRequest<'_> {
    pub fn offset(&self) -> i64 {
        offset(self.page, self.per_page)
    }

    /// URL of `page` for this listing.
    pub fn url(&self, page: i64) -> String {
        let page = page.max(1);
        match self.search {
            Some(term) => format!(
                "{}?search={}&page={page}",
                self.path,
                urlencoding::encode(term)
            ),
            None => format!("{}?page={page}", self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub current_page: i64,
    pub data: Vec<T>,
    pub first_page_url: String,
    pub from: Option<i64>,
    pub last_page: i64,
    pub last_page_url: String,
    pub links: Vec<PageLink>,
    pub next_page_url: Option<String>,
    pub path: String,
    pub per_page: i64,
    pub prev_page_url: Option<String>,
    pub to: Option<i64>,
    pub total: i64,
}

impl<T> Page<T> {
    /// Assemble a page from the rows of `req.page` and the unpaged total.
    pub fn new(data: Vec<T>, total: i64, req: &PageRequest<'_>) -> Self {
        let current = req.page.max(1);
        let per_page = req.per_page.max(1);
        let last_page = last_page(total, per_page);

        let count = data.len() as i64;
        let (from, to) = if count > 0 {
            let from = offset(current, per_page) + 1;
            (Some(from), Some(from + count - 1))
        } else {
            (None, None)
        };

        let prev_page_url = (current > 1).then(|| req.url(current - 1));
        let next_page_url = (current < last_page).then(|| req.url(current + 1));

        let mut links = Vec::new();
        links.push(PageLink {
            url: prev_page_url.clone(),
            label: PREVIOUS_LABEL.to_string(),
            active: false,
        });
        for element in link_window(current, last_page) {
            links.push(match element {
                WindowElement::Page(page) => PageLink {
                    url: Some(req.url(page)),
                    label: page.to_string(),
                    active: page == current,
                },
                WindowElement::Gap => PageLink {
                    url: None,
                    label: GAP_LABEL.to_string(),
                    active: false,
                },
            });
        }
        links.push(PageLink {
            url: next_page_url.clone(),
            label: NEXT_LABEL.to_string(),
            active: false,
        });

        Self {
            current_page: current,
            data,
            first_page_url: req.url(1),
            from,
            last_page,
            last_page_url: req.url(last_page),
            links,
            next_page_url,
            path: req.path.to_string(),
            per_page,
            prev_page_url,
            to,
            total,
        }
    }

    /// Convert the items while keeping the navigation metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            current_page: self.current_page,
            data: self.data.into_iter().map(f).collect(),
            first_page_url: self.first_page_url,
            from: self.from,
            last_page: self.last_page,
            last_page_url: self.last_page_url,
            links: self.links,
            next_page_url: self.next_page_url,
            path: self.path,
            per_page: self.per_page,
            prev_page_url: self.prev_page_url,
            to: self.to,
            total: self.total,
        }
    }
}

/// Number of pages needed for `total` items; never less than 1.
pub fn last_page(total: i64, per_page: i64) -> i64 {
    let per_page = per_page.max(1);
    ((total.max(0) + per_page - 1) / per_page).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowElement {
    Page(i64),
    Gap,
}

/// Numbered entries of the link strip.
pub fn link_window(current: i64, last: i64) -> Vec<WindowElement> {
    use WindowElement::{Gap, Page};

    let range = |from: i64, to: i64| (from.max(1)..=to.min(last)).map(Page);

    if last < SMALL_SLIDER_LIMIT {
        return range(1, last).collect();
    }

    let window = ON_EACH_SIDE + 4;
    let mut out = Vec::new();
    if current <= window {
        out.extend(range(1, window + ON_EACH_SIDE));
        out.push(Gap);
        out.extend(range(last - 1, last));
    } else if current > last - window {
        out.extend(range(1, 2));
        out.push(Gap);
        out.extend(range(last - (window + ON_EACH_SIDE - 1), last));
    } else {
        out.extend(range(1, 2));
        out.push(Gap);
        out.extend(range(current - ON_EACH_SIDE, current + ON_EACH_SIDE));
        out.push(Gap);
        out.extend(range(last - 1, last));
    }
    out
}
