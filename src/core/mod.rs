pub mod action;
pub mod ecs;
pub mod serialization;
pub mod world;
