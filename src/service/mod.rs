pub mod dedup;
pub mod error;
pub mod listing_service;
pub mod offer_service;
pub mod order_service;
pub mod payment_provider;
pub mod quota;
pub mod transaction_service;
