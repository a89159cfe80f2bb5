//! Ingredient availability providers

use std::collections::HashSet;
use std::path::PathBuf;

/// Source of the ingredients currently on hand
pub trait IngredientSource {
    /// Current ingredient set; names may be in any case
    fn available(&self) -> HashSet<String>;
}

/// Ingredients stocked in the reference kitchen
const KITCHEN_STOCK: &[&str] = &[
    "chicken breast",
    "ground beef",
    "eggs",
    "tuna",
    "tomato",
    "onion",
    "garlic",
    "carrots",
    "potatoes",
    "lettuce",
    "cucumber",
    "bell pepper",
    "mushrooms",
    "hot dog bun",
    "sausage",
    "mustard",
    "ketchup",
    "shredded cabbage",
    "hamburger bun",
    "cheddar cheese",
    "milk",
    "butter",
    "cheese",
    "cream",
    "rice",
    "pasta",
    "flour",
    "bread",
    "olive oil",
    "salt",
    "pepper",
    "oregano",
    "tomato sauce",
    "soy sauce",
];

/// The reference kitchen's fixed stock
#[must_use]
pub fn default_kitchen() -> StaticPantry {
    StaticPantry::new(KITCHEN_STOCK.iter().copied())
}

/// A fixed ingredient set
#[derive(Debug, Clone, Default)]
pub struct StaticPantry {
    items: HashSet<String>,
}

impl StaticPantry {
    /// Create a pantry holding the given ingredients
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl IngredientSource for StaticPantry {
    fn available(&self) -> HashSet<String> {
        self.items.clone()
    }
}

/// Inventory kept in a JSON file (`["eggs", "milk"]`), re-read on every call
///
/// Lets an external process keep the stock current while the assistant runs
#[derive(Debug, Clone)]
pub struct FilePantry {
    path: PathBuf,
}

impl FilePantry {
    /// Create a pantry backed by the file at `path`
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IngredientSource for FilePantry {
    fn available(&self) -> HashSet<String> {
        let items = std::fs::read_to_string(&self.path)
            .map_err(crate::Error::from)
            .and_then(|content| Ok(serde_json::from_str::<Vec<String>>(&content)?));

        match items {
            Ok(items) => {
                tracing::debug!(path = %self.path.display(), count = items.len(), "read pantry inventory");
                items.into_iter().collect()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read pantry inventory");
                HashSet::new()
            }
        }
    }
}
