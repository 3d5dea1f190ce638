pub mod listingdtos;
pub mod offerdtos;
pub mod orderdtos;
pub mod transactiondtos;
pub mod userdtos;
