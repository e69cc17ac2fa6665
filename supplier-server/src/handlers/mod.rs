pub mod health;
pub mod suppliers;
