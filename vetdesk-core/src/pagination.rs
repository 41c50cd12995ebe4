//! Page-selector arithmetic

use serde::Serialize;

pub use vetdesk_api::total_pages;

/// Pages shown on each side of the current one.
const WINDOW_RADIUS: u32 = 2;

/// Page numbers to render: `current - 2 ..= current + 2`, clipped to
/// `1 ..= total_pages`. Never more than five entries.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    let total_pages = total_pages.max(1);
    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = current.saturating_add(WINDOW_RADIUS).min(total_pages);
    (start..=end).collect()
}

/// Everything a page selector needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub current: u32,
    pub total_pages: u32,
    pub pages: Vec<u32>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PageControls {
    pub fn new(current: u32, total_pages: u32) -> Self {
        Self {
            current,
            total_pages,
            pages: page_window(current, total_pages),
            previous_enabled: current > 1,
            next_enabled: current < total_pages,
        }
    }
}
