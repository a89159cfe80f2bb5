//! Recipe records and catalog loading

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single recipe record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Recipe {
    /// Display name, also the key used for lookups
    pub name: String,

    /// Ingredients in the order they should be read out
    pub ingredients: Vec<String>,

    /// Preparation instructions
    pub instructions: String,
}

impl Recipe {
    /// Create a recipe
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        ingredients: impl IntoIterator<Item = impl Into<String>>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            instructions: instructions.into(),
        }
    }

    /// Ingredients joined for speaking, e.g. "tomato, salt"
    #[must_use]
    pub fn ingredient_list(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// Accepted shapes of a recipes file
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    /// `[ {...}, {...} ]`
    List(Vec<Recipe>),
    /// `{ "recipes": [ {...} ] }`
    Wrapped { recipes: Vec<Recipe> },
}

/// Ordered, read-only collection of recipes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Build a catalog from recipes, keeping their order
    #[must_use]
    pub const fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Parse a catalog from JSON text
    ///
    /// # Errors
    ///
    /// Returns error if the text is not JSON, or is neither a list of
    /// recipes nor an object with a `recipes` list
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;

        let document: CatalogDocument = serde_json::from_value(value)
            .map_err(|e| Error::Catalog(format!("unexpected JSON format: {e}")))?;

        let recipes = match document {
            CatalogDocument::List(recipes) | CatalogDocument::Wrapped { recipes } => recipes,
        };

        Ok(Self { recipes })
    }

    /// Read and parse a catalog file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Recipes in catalog order
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Iterate recipes in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Number of recipes
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the catalog has no recipes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

/// Load the recipe catalog from a JSON file
///
/// Never fails: a missing file, malformed JSON or an unexpected shape is
/// logged and yields an empty catalog
#[must_use]
pub fn load_catalog(path: &Path) -> Catalog {
    match Catalog::from_path(path) {
        Ok(catalog) => {
            tracing::info!(path = %path.display(), recipes = catalog.len(), "loaded recipe catalog");
            catalog
        }
        Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!(path = %path.display(), "recipes file not found");
            Catalog::default()
        }
        Err(Error::Serialization(e)) => {
            tracing::error!(path = %path.display(), error = %e, "recipes file is not properly formatted");
            Catalog::default()
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to load recipes");
            Catalog::default()
        }
    }
}
