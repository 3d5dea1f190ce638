pub mod listings;
pub mod offers;
pub mod orders;
pub mod transactions;
pub mod users;
