//! Pure data structures shared by the stores, services and checkout.

pub mod cart;
pub mod menu;
pub mod order;
pub mod user;

pub use cart::*;
pub use menu::*;
pub use order::*;
pub use user::*;
