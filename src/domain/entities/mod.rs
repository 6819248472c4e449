pub mod portfolio;
pub mod trade;
