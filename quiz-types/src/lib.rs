pub mod career;
pub mod errors;
pub mod round;

// Re-export all types
pub use career::*;
pub use errors::*;
pub use round::*;

pub type PlayerId = uuid::Uuid;
pub type PartyId = uuid::Uuid;
pub type MemberId = uuid::Uuid;
