use tracing::debug;

use crate::error::Result;

/// Number of records requested per page of a listing.
pub const PAGE_SIZE: usize = 100;

/// Collects a page-numbered listing, starting at page 1.
///
/// Stops after the first page holding fewer than `page_size` items (an empty
/// page included) without requesting another one. The first failing page
/// aborts the whole collection.
pub fn collect_pages<T, F>(page_size: usize, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Result<Vec<T>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch_page(page)?;
        let count = batch.len();
        debug!("Page {} returned {} records", page, count);
        items.extend(batch);

        if count == 0 || count < page_size {
            break;
        }
        page += 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;

    fn pages(sizes: &[usize]) -> impl FnMut(u32) -> Result<Vec<usize>> + '_ {
        move |page| Ok(vec![page as usize; sizes[page as usize - 1]])
    }

    #[test]
    fn test_stops_after_short_page() {
        let mut requested = Vec::new();
        let mut source = pages(&[3, 3, 2, 3]);
        let items = collect_pages(3, |page| {
            requested.push(page);
            source(page)
        })
        .unwrap();

        assert_eq!(requested, vec![1, 2, 3]);
        assert_eq!(items.len(), 8);
    }

    #[test]
    fn test_stops_after_empty_page() {
        let mut requested = Vec::new();
        let mut source = pages(&[2, 2, 0, 2]);
        let items = collect_pages(2, |page| {
            requested.push(page);
            source(page)
        })
        .unwrap();

        assert_eq!(requested, vec![1, 2, 3]);
        assert_eq!(items, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_single_empty_listing() {
        let mut calls = 0;
        let items: Vec<u8> = collect_pages(PAGE_SIZE, |_| {
            calls += 1;
            Ok(Vec::new())
        })
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_page_failure_aborts() {
        let mut requested = Vec::new();
        let result: Result<Vec<u8>> = collect_pages(1, |page| {
            requested.push(page);
            if page == 2 {
                Err(SourceError::Unavailable {
                    status: 502,
                    url: "https://api.github.com/users/x/repos?page=2".to_string(),
                    body: "Bad Gateway".to_string(),
                })
            } else {
                Ok(vec![0])
            }
        });

        assert!(matches!(
            result,
            Err(SourceError::Unavailable { status: 502, .. })
        ));
        assert_eq!(requested, vec![1, 2]);
    }
}
