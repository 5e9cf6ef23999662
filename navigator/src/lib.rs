//! Drill-down navigation over the illustration catalog: the dependent
//! filter resolver, page routes with breadcrumbs, and favorite toggling.

pub mod error;
pub mod favorites;
pub mod navigation;
pub mod resolver;
pub mod source;

pub use error::NavigationError;
pub use error::Result;
pub use favorites::FavoritesCache;
pub use favorites::FavoritesToggle;
pub use navigation::Crumb;
pub use navigation::NavContext;
pub use navigation::NavState;
pub use navigation::Route;
pub use navigation::breadcrumbs;
pub use navigation::resolve_context;
pub use resolver::FilterResolver;
pub use resolver::Level;
pub use resolver::LoadStatus;
pub use resolver::ResolverOptions;
pub use resolver::Selection;
pub use source::CatalogSource;
pub use source::FavoriteSource;
