//! Category narrowing over an already-aggregated feed.

use uuid::Uuid;

use domains::NewsWithDetails;

/// Returns the subset of `items` whose resolved category set contains
/// `selected`. `None` is the identity — no filter applied. Toggle semantics
/// (re-selecting the active category clears it) live at the call site.
pub fn filter_by_category(
    items: Vec<NewsWithDetails>,
    selected: Option<Uuid>,
) -> Vec<NewsWithDetails> {
    match selected {
        Some(category_id) => items
            .into_iter()
            .filter(|item| item.has_category(category_id))
            .collect(),
        None => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::news_with_categories;

    #[test]
    fn none_is_identity() {
        let politics = Uuid::new_v4();
        let items = vec![
            news_with_categories("a", &[politics]),
            news_with_categories("b", &[]),
        ];
        let out = filter_by_category(items.clone(), None);
        assert_eq!(out.len(), items.len());
    }

    #[test]
    fn selects_exactly_the_matching_subset() {
        let politics = Uuid::new_v4();
        let sport = Uuid::new_v4();
        let items = vec![
            news_with_categories("a", &[politics]),
            news_with_categories("b", &[sport]),
            news_with_categories("c", &[politics, sport]),
            news_with_categories("d", &[]),
        ];

        let out = filter_by_category(items, Some(politics));
        let titles: Vec<_> = out.iter().map(|i| i.news.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn toggling_at_call_site_restores_the_full_set() {
        // The UI clears the selection when the same category is pressed
        // twice; the second call therefore passes None again.
        let politics = Uuid::new_v4();
        let items = vec![
            news_with_categories("a", &[politics]),
            news_with_categories("b", &[]),
        ];

        let filtered = filter_by_category(items.clone(), Some(politics));
        assert_eq!(filtered.len(), 1);
        let restored = filter_by_category(items.clone(), None);
        assert_eq!(restored.len(), items.len());
    }
}
