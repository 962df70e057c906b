pub mod barracks;
pub mod builder;
pub mod commandcenter;
pub mod constructionsystem;
pub mod data;
pub mod factory;
pub mod orbitalcommand;
pub mod refinery;
pub mod supplydepot;
pub mod tracker;
