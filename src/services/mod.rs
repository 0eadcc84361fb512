pub mod bundle;
pub mod chart_of_accounts;
pub mod excel;
pub mod pipeline;
pub mod transformer;
