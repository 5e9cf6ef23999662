pub mod auth;
pub mod comment;
pub mod favorite;
pub mod illustration;
pub mod page;
pub mod parts;
pub mod vehicle;

pub use auth::LoginRequest;
pub use auth::LoginResponse;
pub use auth::RefreshRequest;
pub use auth::RefreshResponse;
pub use auth::TokenPair;
pub use comment::Comment;
pub use comment::NewComment;
pub use favorite::Favorite;
pub use favorite::FavoriteStatus;
pub use favorite::FavoriteTarget;
pub use favorite::FavoriteToggleRequest;
pub use illustration::BulkDeleteRequest;
pub use illustration::FileType;
pub use illustration::Illustration;
pub use illustration::IllustrationDetail;
pub use illustration::IllustrationFile;
pub use illustration::IllustrationPatch;
pub use illustration::IllustrationStats;
pub use illustration::NewIllustration;
pub use illustration::UploadFile;
pub use page::Page;
pub use parts::PartCategory;
pub use parts::PartCategoryInput;
pub use parts::PartSubCategory;
pub use parts::PartSubCategoryInput;
pub use vehicle::CarModel;
pub use vehicle::CarModelInput;
pub use vehicle::Choice;
pub use vehicle::EngineModel;
pub use vehicle::EngineModelInput;
pub use vehicle::Manufacturer;
pub use vehicle::ManufacturerInput;

/// Primary key type used by every backend resource.
pub type Id = i64;
