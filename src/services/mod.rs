pub mod providers;
pub mod selection;

pub use providers::{CatalogStore, HealthProbe, HttpBackend, RecommendationClient};
pub use selection::{SelectionCoordinator, SelectionSet, SlotIndex, SlotOption};
