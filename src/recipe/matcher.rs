//! Recipe lookup by name and by available ingredients

use std::collections::HashSet;

use super::Recipe;

/// Find the first recipe whose name contains `query`, ignoring case
///
/// Candidates are scanned in the order given, so the catalog order breaks
/// ties. An empty query never matches.
pub fn find_by_name<'a, I>(query: &str, recipes: I) -> Option<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let found = recipes
        .into_iter()
        .find(|recipe| recipe.name.to_lowercase().contains(&query));

    tracing::debug!(query, found = ?found.map(|r| &r.name), "recipe lookup");
    found
}

/// Find every recipe whose ingredients are all available, in catalog order
///
/// Comparison is case-insensitive on both sides. A recipe with no
/// ingredients is always feasible.
pub fn find_feasible<'a, I>(available: &HashSet<String>, recipes: I) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let available: HashSet<String> = available.iter().map(|i| i.to_lowercase()).collect();

    let feasible: Vec<&Recipe> = recipes
        .into_iter()
        .filter(|recipe| {
            recipe
                .ingredients
                .iter()
                .all(|ingredient| available.contains(&ingredient.to_lowercase()))
        })
        .collect();

    tracing::debug!(
        available = available.len(),
        feasible = feasible.len(),
        "feasibility check"
    );
    feasible
}
