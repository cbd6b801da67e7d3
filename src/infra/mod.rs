pub mod factory;
pub mod payments;
pub mod repositories;
pub mod rooms;
