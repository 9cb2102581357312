//! Action provider implementations shipped with the client.

pub mod random;

pub use random::RandomShooter;
