//! Game publishing pipeline.
//!
//! Takes an assembled bundle from `gamedock-bundle`, validates it, stores
//! its bytes through an [`ObjectStore`], and produces the public
//! [`GameRecord`] with a resolved game URL. Two entry points share the
//! pipeline: zip archive uploads and explicit JSON file lists.

pub mod error;
pub mod publisher;
pub mod record;
pub mod response;
pub mod storage;
pub mod url;
pub mod validate;

pub use error::PublishError;
pub use publisher::Publisher;
pub use record::{GameRecord, GameStatus, PublishRequest, allocate_id, oss_prefix};
pub use response::{ApiResponse, error_parts};
pub use storage::{ObjectStore, StoreError};
pub use url::{HostPolicy, resolve_game_url};
pub use validate::{ValidationError, validate_bundle};
