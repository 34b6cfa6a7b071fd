pub mod entity;
pub mod enums;
