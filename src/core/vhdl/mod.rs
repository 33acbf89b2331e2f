pub mod architecture;
pub mod constant;
pub mod entity;
pub mod error;
pub mod identifier;
pub mod interface;
pub mod normalize;
