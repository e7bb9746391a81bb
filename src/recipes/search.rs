use tracing::info;

use super::api::{RecipeClient, RecipeSummary};
use crate::error::Result;

pub const RES_PER_PAGE: usize = 10;

/// One search submission and its results, in API order.
#[derive(Debug, Clone, Default)]
pub struct Search {
    pub query: String,
    pub results: Vec<RecipeSummary>,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
        }
    }

    pub async fn get_results(&mut self, client: &RecipeClient) -> Result<()> {
        self.results = client.search(&self.query).await?;
        info!("Search {:?} returned {} recipes", self.query, self.results.len());
        Ok(())
    }
}

/// Which page navigation buttons to show below a results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageButtons {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

pub fn page_count(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1))
}

/// Returns the 1-based `page` of `results`. Pages past the end are empty.
pub fn paginate<T>(results: &[T], page: usize, per_page: usize) -> &[T] {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page).min(results.len());
    let end = start.saturating_add(per_page).min(results.len());
    &results[start..end]
}

pub fn page_buttons(page: usize, len: usize, per_page: usize) -> PageButtons {
    let pages = page_count(len, per_page);
    if pages <= 1 || page == 0 || page > pages {
        return PageButtons::default();
    }
    PageButtons {
        prev: (page > 1).then(|| page - 1),
        next: (page < pages).then(|| page + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_reconstruct_results() {
        let results: Vec<u32> = (0..23).collect();
        let pages = page_count(results.len(), RES_PER_PAGE);
        assert_eq!(pages, 3);

        let joined: Vec<u32> = (1..=pages)
            .flat_map(|page| paginate(&results, page, RES_PER_PAGE).to_vec())
            .collect();
        assert_eq!(joined, results);
        assert_eq!(paginate(&results, 3, RES_PER_PAGE).len(), 3);
    }

    #[test]
    fn test_paginate_out_of_range() {
        let results: Vec<u32> = (0..5).collect();
        assert!(paginate(&results, 2, RES_PER_PAGE).is_empty());
        assert_eq!(paginate(&results, 0, RES_PER_PAGE), &results[..]);
        assert!(paginate::<u32>(&[], 1, RES_PER_PAGE).is_empty());
    }

    #[test]
    fn test_page_buttons() {
        assert_eq!(page_buttons(1, 5, 10), PageButtons::default());
        assert_eq!(page_buttons(1, 30, 10), PageButtons { prev: None, next: Some(2) });
        assert_eq!(page_buttons(2, 30, 10), PageButtons { prev: Some(1), next: Some(3) });
        assert_eq!(page_buttons(3, 30, 10), PageButtons { prev: Some(2), next: None });
        assert_eq!(page_buttons(4, 30, 10), PageButtons::default());
    }
}
