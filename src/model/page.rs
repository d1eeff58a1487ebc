// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page arithmetic and the pagination descriptor handed to the view layer.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: PageSize = PageSize(match NonZeroUsize::new(24) {
    Some(size) => size,
    None => unreachable!(),
});

/// Number of entries shown per page (always > 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        DEFAULT_PAGE_SIZE
    }
}

impl TryFrom<usize> for PageSize {
    type Error = &'static str;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("page size must be greater than zero")
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// A 1-based page number together with the page size it is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_number: usize,
    pub page_size: PageSize,
}

impl PageWindow {
    pub fn new(page_number: usize, page_size: PageSize) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size,
        }
    }

    pub fn offset(self) -> usize {
        (self.page_number - 1).saturating_mul(self.page_size.get())
    }

    pub fn limit(self) -> usize {
        self.page_size.get()
    }

    /// The slice of a list with `len` items this window covers (possibly empty).
    pub fn range_within(self, len: usize) -> Range<usize> {
        let start = self.offset().min(len);
        let end = start.saturating_add(self.limit()).min(len);
        start..end
    }
}

/// `ceil(item_count / page_size)`, never less than 1.
pub fn total_pages(item_count: usize, page_size: PageSize) -> usize {
    item_count.div_ceil(page_size.get()).max(1)
}

pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLabel {
    First,
    Previous,
    Number(usize),
    Next,
    Last,
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("First"),
            Self::Previous => f.write_str("Previous"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Next => f.write_str("Next"),
            Self::Last => f.write_str("Last"),
        }
    }
}

/// One pagination control: its label, the concrete page it leads to, and whether that page is
/// the one currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub label: PageLabel,
    pub target: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationDescriptor {
    links: Vec<PageLink>,
    total_pages: usize,
    current_page: usize,
}

impl PaginationDescriptor {
    /// Builds First, Previous, `1..=total_pages`, Next, Last with every target clamped into range.
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        let current_page = clamp_page(current_page, total_pages);

        let labels = [PageLabel::First, PageLabel::Previous]
            .into_iter()
            .chain((1..=total_pages).map(PageLabel::Number))
            .chain([PageLabel::Next, PageLabel::Last]);

        let links = labels
            .map(|label| {
                let target = match label {
                    PageLabel::First => 1,
                    PageLabel::Previous => current_page.saturating_sub(1).max(1),
                    PageLabel::Number(n) => n,
                    PageLabel::Next => (current_page + 1).min(total_pages),
                    PageLabel::Last => total_pages,
                };
                PageLink {
                    label,
                    target,
                    active: target == current_page,
                }
            })
            .collect();

        Self {
            links,
            total_pages,
            current_page,
        }
    }

    pub fn links(&self) -> &[PageLink] {
        &self.links
    }

    pub fn labels(&self) -> Vec<String> {
        self.links.iter().map(|link| link.label.to_string()).collect()
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        self.links.iter().map(|link| link.target).collect()
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn target_of(&self, label: PageLabel) -> Option<usize> {
        self.links.iter().find(|link| link.label == label).map(|link| link.target)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{
        clamp_page, total_pages, PageLabel, PageSize, PageWindow, PaginationDescriptor,
        DEFAULT_PAGE_SIZE,
    };

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(24, 1)]
    #[case(25, 2)]
    #[case(600, 25)]
    #[case(1302, 55)]
    fn total_pages_rounds_up_with_floor_of_one(#[case] items: usize, #[case] expected: usize) {
        assert_eq!(total_pages(items, DEFAULT_PAGE_SIZE), expected);
    }

    #[rstest]
    #[case(0, 25, 1)]
    #[case(1, 25, 1)]
    #[case(25, 25, 25)]
    #[case(26, 25, 25)]
    #[case(usize::MAX, 25, 25)]
    #[case(3, 0, 1)]
    fn clamp_page_stays_in_range(
        #[case] requested: usize,
        #[case] total: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(clamp_page(requested, total), expected);
    }

    #[test]
    fn window_offsets_follow_page_number() {
        let size = PageSize::new(24).unwrap();
        assert_eq!(PageWindow::new(1, size).offset(), 0);
        assert_eq!(PageWindow::new(3, size).offset(), 48);
        assert_eq!(PageWindow::new(0, size).page_number, 1);
    }

    #[test]
    fn window_range_is_cut_at_list_end() {
        let size = PageSize::new(24).unwrap();
        assert_eq!(PageWindow::new(1, size).range_within(30), 0..24);
        assert_eq!(PageWindow::new(2, size).range_within(30), 24..30);
        assert_eq!(PageWindow::new(3, size).range_within(30), 30..30);
        assert_eq!(PageWindow::new(1, size).range_within(0), 0..0);
    }

    #[test]
    fn descriptor_lists_controls_around_numbered_pages() {
        let descriptor = PaginationDescriptor::new(2, 3);
        assert_eq!(
            descriptor.labels(),
            vec!["First", "Previous", "1", "2", "3", "Next", "Last"]
        );
        assert_eq!(descriptor.page_numbers(), vec![1, 1, 1, 2, 3, 3, 3]);

        let active = descriptor
            .links()
            .iter()
            .filter(|link| link.active)
            .map(|link| link.label)
            .collect::<Vec<_>>();
        assert_eq!(active, vec![PageLabel::Number(2)]);
    }

    #[test]
    fn descriptor_on_first_page_flags_every_link_pointing_at_it() {
        let descriptor = PaginationDescriptor::new(1, 4);
        let active = descriptor
            .links()
            .iter()
            .filter(|link| link.active)
            .map(|link| link.label)
            .collect::<Vec<_>>();
        assert_eq!(active, vec![PageLabel::First, PageLabel::Previous, PageLabel::Number(1)]);
        assert_eq!(descriptor.target_of(PageLabel::Next), Some(2));
        assert_eq!(descriptor.target_of(PageLabel::Last), Some(4));
    }

    #[test]
    fn descriptor_for_empty_result_has_single_page() {
        let descriptor = PaginationDescriptor::new(1, 0);
        assert_eq!(descriptor.total_pages(), 1);
        assert_eq!(
            descriptor.labels(),
            vec!["First", "Previous", "1", "Next", "Last"]
        );
        assert!(descriptor.links().iter().all(|link| link.target == 1 && link.active));
    }

    #[test]
    fn descriptor_clamps_out_of_range_current_page() {
        let descriptor = PaginationDescriptor::new(9, 3);
        assert_eq!(descriptor.current_page(), 3);
        assert_eq!(descriptor.target_of(PageLabel::Next), Some(3));
        assert_eq!(descriptor.target_of(PageLabel::Previous), Some(2));
    }

    #[test]
    fn page_size_rejects_zero() {
        assert_eq!(PageSize::new(0), None);
        assert!(serde_json::from_str::<PageSize>("0").is_err());
        assert_eq!(serde_json::from_str::<PageSize>("12").unwrap().get(), 12);
    }
}
