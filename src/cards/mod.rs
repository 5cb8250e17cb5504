//! Card system: static definitions and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of one physical card (`attack_001`, `dict_015`)
//! - `Card`: Static card data (kind, name, effect text, visibility)
//! - `CardKind`: Deck and category in one tagged value
//! - `CardCatalog`: Lookup table, built once per process via `catalog()`

pub mod catalog;
pub mod definition;

pub use catalog::{catalog, CardCatalog};
pub use definition::{Card, CardId, CardKind, CardType, Category, DictatorshipTarget, WorkCategory};
