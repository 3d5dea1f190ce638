pub mod db;
pub mod listingdb;
pub mod offerdb;
pub mod orderdb;
pub mod transactiondb;
pub mod userdb;
