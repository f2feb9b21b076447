//! Pure data structures shared by the actors and their observers.

pub mod details;
pub mod favorites;
pub mod restaurant;
pub mod review;

pub use details::*;
pub use favorites::*;
pub use restaurant::*;
pub use review::*;
