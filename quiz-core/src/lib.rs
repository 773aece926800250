pub mod config;
pub mod game_events;
pub mod name_matching;
pub mod pacing;
pub mod round_state;
pub mod scoring;
pub mod session;
pub mod store;

// Re-export main components
pub use config::*;
pub use game_events::*;
pub use name_matching::*;
pub use pacing::*;
pub use round_state::*;
pub use scoring::*;
pub use session::*;
pub use store::*;
