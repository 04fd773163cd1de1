use std::num::NonZeroUsize;

/// One visible page of a result set
#[derive(Debug, PartialEq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    /// Offset of the first visible item, clipped to the result length
    pub first_index: usize,
    /// Exclusive end offset of the visible items, clipped to the result length
    pub last_index: usize,
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Slice out page `page` (1-based). Out-of-range pages give an empty slice;
/// page 0 is read as page 1.
pub fn derive_page<T>(results: &[T], page: usize, page_size: NonZeroUsize) -> PageSlice<'_, T> {
    let size = page_size.get();
    let page = page.max(1);

    let first_index = (page - 1).saturating_mul(size).min(results.len());
    let last_index = page.saturating_mul(size).min(results.len());

    PageSlice {
        items: &results[first_index..last_index],
        first_index,
        last_index,
        total_pages: total_pages(results.len(), page_size),
    }
}

pub fn next_page(current: usize, total_pages: usize) -> Option<usize> {
    (current < total_pages).then(|| current + 1)
}

pub fn prev_page(current: usize) -> Option<usize> {
    (current > 1).then(|| current - 1)
}

/// Clamp a requested page into `[1, total_pages]` (1 when there are no pages)
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Gap,
}

/// Compact page strip: first, last, current and its neighbours, with one gap
/// marker per contiguous break
pub fn page_strip(current: usize, total_pages: usize) -> Vec<PageMarker> {
    let mut strip = Vec::new();
    let mut previous: Option<usize> = None;

    for page in 1..=total_pages {
        let visible = page == 1 || page == total_pages || page.abs_diff(current) <= 1;
        if !visible {
            continue;
        }
        if previous.is_some_and(|p| page - p > 1) {
            strip.push(PageMarker::Gap);
        }
        strip.push(PageMarker::Page(page));
        previous = Some(page);
    }

    strip
}
