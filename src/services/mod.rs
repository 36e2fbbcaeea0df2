pub mod budget;
pub mod composer;
pub mod engine;
pub mod generation;
pub mod links;
pub mod palette;
pub mod presets;
pub mod providers;
pub mod query;
pub mod selector;
