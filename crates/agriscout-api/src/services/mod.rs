pub mod export;
pub mod insights;
pub mod location;

pub use export::fields_to_geojson;
pub use insights::{InsightProvider, PlaceholderInsights};
pub use location::spawn_lookup;
