//! API endpoint implementations.

mod actions;
mod entities;
mod search;
mod stats;
mod tags;

pub use actions::{ActionsApi, ActionsRequest};
pub use entities::{EntitiesApi, EntityRequest};
pub use search::{SearchApi, SearchRequest, filter_type};
pub use stats::{StatsApi, StatsRequest};
pub use tags::{TagEntityRequest, TagsApi};
