use crate::types::Recipe;

/// Case-insensitive substring match on `title`, preserving input order.
/// An empty query matches everything.
pub fn filter_by_title<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    let needle = query.to_lowercase();
    recipes
        .iter()
        .filter(|r| r.title().to_lowercase().contains(&needle))
        .collect()
}
