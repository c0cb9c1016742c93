pub mod entrance;
pub mod idle;
pub mod spring;
