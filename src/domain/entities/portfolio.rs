use serde::{Deserialize, Serialize};

/// A portfolio group as returned by `GET /portfolioGroups`.
///
/// The API returns more fields than these; only the ones the workflow needs
/// are kept and the rest are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioGroup {
    pub id: String,
    pub name: String,
}
