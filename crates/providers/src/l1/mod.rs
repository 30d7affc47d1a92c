pub use source::L1Source;
mod source;

pub use transactor::L1Transactor;
mod transactor;

pub use price_feed::PriceFeed;
mod price_feed;
