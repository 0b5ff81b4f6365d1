// src/models/mod.rs

//! Data structures mirroring the items API collections.

pub mod budget;
pub mod item;
pub mod order;
pub mod project;
pub mod task;
pub mod team;
pub mod user;

pub use budget::Budget;
pub use item::Item;
pub use order::{Order, OrderStatus};
pub use project::Project;
pub use task::{Task, TaskStatus};
pub use team::TeamInvite;
pub use user::User;
