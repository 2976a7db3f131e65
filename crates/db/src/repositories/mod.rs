//! Repository layer: one zero-sized struct per aggregate, with async
//! associated functions taking the pool explicitly.

pub mod recipe_repo;

pub use recipe_repo::RecipeRepo;
