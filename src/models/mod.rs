pub mod listingmodel;
pub mod offermodel;
pub mod ordermodel;
pub mod transactionmodel;
pub mod usermodel;
