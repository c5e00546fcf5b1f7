// src/api/pagination.rs
//! Cursor-driven draining of list endpoints.

use super::types::{PageRequest, PaginatedResponse, PaginationRequest, PaginationResult};
use crate::error::AppError;

/// Fetches every page of a list endpoint and concatenates the items.
///
/// The first call carries no cursor; each later call carries the cursor the
/// previous page returned. The loop ends when a page says there is nothing
/// more, when it says there is more but hands back no cursor, or when it
/// hands back the cursor that was just used. With an item cap, collection
/// stops at exactly the cap and the result is marked truncated.
///
/// A failing page aborts the drain; there is no retry here.
pub async fn drain_pages<T, F, Fut>(
    mut fetch_page: F,
    request: PaginationRequest,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages_fetched = 0u32;
    let mut truncated = false;

    loop {
        let response = fetch_page(PageRequest {
            page_size: request.page_size,
            page_token: page_token.clone(),
        })
        .await?;
        pages_fetched += 1;

        let cursor = response.cursor();
        all_items.extend(response.items);

        if let Some(cap) = request.item_cap {
            if all_items.len() >= cap {
                // Only a cap that cut off announced results counts as truncation
                truncated = all_items.len() > cap || cursor.has_more;
                all_items.truncate(cap);
                if truncated {
                    log::warn!(
                        "Stopped after {} items (cap {}); remaining results were not fetched",
                        all_items.len(),
                        cap
                    );
                }
                break;
            }
        }

        if !cursor.has_more {
            break;
        }
        match cursor.page_token {
            None => {
                log::debug!("Page {} reports has_more without a cursor", pages_fetched);
                break;
            }
            Some(next) if page_token.as_deref() == Some(next.as_str()) => {
                log::warn!(
                    "Page {} repeated cursor '{}'; stopping to avoid a loop",
                    pages_fetched,
                    next
                );
                break;
            }
            Some(next) => page_token = Some(next),
        }
    }

    log::debug!(
        "Drained {} items over {} page(s)",
        all_items.len(),
        pages_fetched
    );

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Serves canned pages in order and records the cursors it was asked for.
    struct ScriptedPages {
        pages: RefCell<VecDeque<Result<PaginatedResponse<u32>, AppError>>>,
        seen_tokens: RefCell<Vec<Option<String>>>,
    }

    impl ScriptedPages {
        fn new(pages: Vec<Result<PaginatedResponse<u32>, AppError>>) -> Self {
            Self {
                pages: RefCell::new(pages.into()),
                seen_tokens: RefCell::new(Vec::new()),
            }
        }

        async fn next(&self, page: PageRequest) -> Result<PaginatedResponse<u32>, AppError> {
            self.seen_tokens.borrow_mut().push(page.page_token);
            self.pages
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("drain asked for more pages than scripted"))
        }

        fn calls(&self) -> usize {
            self.seen_tokens.borrow().len()
        }
    }

    #[tokio::test]
    async fn follows_cursors_until_has_more_is_false() {
        let script = ScriptedPages::new(vec![
            Ok(PaginatedResponse::with_more(vec![1, 2], "c1")),
            Ok(PaginatedResponse::with_more(vec![3], "c2")),
            Ok(PaginatedResponse::last(vec![4, 5])),
        ]);

        let result = drain_pages(|page| script.next(page), PaginationRequest::complete(2))
            .await
            .unwrap();

        assert_eq!(result.items, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.pages_fetched, 3);
        assert!(!result.truncated);
        assert_eq!(
            *script.seen_tokens.borrow(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn repeated_cursor_terminates() {
        let script = ScriptedPages::new(vec![
            Ok(PaginatedResponse::with_more(vec![1], "c1")),
            Ok(PaginatedResponse::with_more(vec![2], "c1")),
            Ok(PaginatedResponse::last(vec![3])),
        ]);

        let result = drain_pages(|page| script.next(page), PaginationRequest::complete(1))
            .await
            .unwrap();

        assert!(script.calls() <= 3);
        assert_eq!(result.items, vec![1, 2]);
    }

    #[tokio::test]
    async fn missing_cursor_terminates() {
        let script = ScriptedPages::new(vec![
            Ok(PaginatedResponse::with_more(vec![1], "c1")),
            Ok(PaginatedResponse {
                items: vec![2],
                page_token: None,
                has_more: true,
            }),
        ]);

        let result = drain_pages(|page| script.next(page), PaginationRequest::complete(1))
            .await
            .unwrap();

        assert_eq!(script.calls(), 2);
        assert_eq!(result.items, vec![1, 2]);
    }

    #[tokio::test]
    async fn endless_endpoint_stops_at_cap() {
        let calls = RefCell::new(0u32);
        let endless = |_page: PageRequest| {
            let n = {
                let mut calls = calls.borrow_mut();
                *calls += 1;
                *calls
            };
            async move {
                let items: Vec<u32> = (0..500).collect();
                Ok::<_, AppError>(PaginatedResponse::with_more(items, format!("c{}", n)))
            }
        };

        let result = drain_pages(endless, PaginationRequest::capped(500, 10_000))
            .await
            .unwrap();

        assert_eq!(result.items.len(), 10_000);
        assert!(result.truncated);
        assert_eq!(*calls.borrow(), 20);
    }

    #[tokio::test]
    async fn cap_never_exceeded_on_uneven_pages() {
        let script = ScriptedPages::new(vec![
            Ok(PaginatedResponse::with_more(vec![1, 2, 3], "c1")),
            Ok(PaginatedResponse::with_more(vec![4, 5, 6], "c2")),
        ]);

        let result = drain_pages(|page| script.next(page), PaginationRequest::capped(3, 4))
            .await
            .unwrap();

        assert_eq!(result.items, vec![1, 2, 3, 4]);
        assert!(result.truncated);
    }

    #[tokio::test]
    async fn reaching_cap_on_the_final_page_is_not_truncation() {
        let script = ScriptedPages::new(vec![Ok(PaginatedResponse::last(vec![1, 2]))]);

        let result = drain_pages(|page| script.next(page), PaginationRequest::capped(2, 2))
            .await
            .unwrap();

        assert_eq!(result.items, vec![1, 2]);
        assert!(!result.truncated);
    }

    #[tokio::test]
    async fn page_failure_aborts_the_drain() {
        let script = ScriptedPages::new(vec![
            Ok(PaginatedResponse::with_more(vec![1], "c1")),
            Err(AppError::Timeout {
                endpoint: "docx/v1/documents/x/blocks".to_string(),
            }),
        ]);

        let result = drain_pages(|page| script.next(page), PaginationRequest::complete(1)).await;

        assert!(matches!(result, Err(AppError::Timeout { .. })));
        assert_eq!(script.calls(), 2);
    }
}
