pub mod entity;
pub mod pose;
