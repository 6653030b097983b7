pub mod company_resolver;
pub mod enrichment;
pub mod matcher;
