pub mod api;
pub mod page;

pub use api::{AppState, CommandResponse, MoveRequest};
