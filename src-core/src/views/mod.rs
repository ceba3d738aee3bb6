// FICHIER : src-core/src/views/mod.rs

//! Vues : chaque vue possède ses données (`ViewSlot`) et reçoit le contexte applicatif.

pub mod admin;
pub mod collection;
pub mod collections;
pub mod comments;
pub mod home;
pub mod item;
pub mod likes;
pub mod state;

pub use admin::{AdminView, BulkAction};
pub use collection::{CollectionData, CollectionView};
pub use collections::CollectionsView;
pub use comments::CommentsView;
pub use home::HomeView;
pub use item::{ItemData, ItemView};
pub use likes::{LikeState, LikeToggle};
pub use state::{ViewSlot, ViewState};
