//! Recipe catalog, matching and ingredient availability
//!
//! The catalog is loaded once at startup and never mutated afterwards.
//! Matching is plain case-insensitive substring and subset logic: the first
//! entry in catalog order wins, there is no ranking

mod catalog;
mod matcher;
mod pantry;

pub use catalog::{Catalog, Recipe, load_catalog};
pub use matcher::{find_by_name, find_feasible};
pub use pantry::{FilePantry, IngredientSource, StaticPantry, default_kitchen};
