pub mod member;
pub mod user_setting;
pub mod workspace;

pub use workspace::{ActiveModel, Column, Entity, Model, Relation};
