//! Route modules organized by bounded context.

pub mod character;
pub mod health;
pub mod rules;
pub mod session;
pub mod turn;
