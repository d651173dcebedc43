pub mod assets;
pub mod health;
pub mod index;

pub use assets::serve_asset;
pub use health::health_check;
pub use index::index_page;
