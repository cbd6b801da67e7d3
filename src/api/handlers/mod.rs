pub mod availability;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod health;
pub mod lessons;
pub mod schedule;
