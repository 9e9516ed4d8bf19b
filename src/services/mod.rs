pub mod classifier;
pub mod details;
pub mod fallback;
pub mod fetcher;
pub mod providers;
pub mod random;
pub mod recommendations;
pub mod showcase;

pub use details::DetailResolver;
pub use recommendations::RecommendationService;
pub use showcase::CoverShowcase;
