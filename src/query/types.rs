//! Query types
//!
//! Filter parameters and HS classification levels.

use crate::error::{Error, Result};
use crate::types::{FormPairs, PeriodKind};
use serde::{Deserialize, Serialize};

// ============================================================================
// HS Level
// ============================================================================

/// Classification level selected by the length of the HS code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsLevel {
    /// 2-digit chapter (also used when no HS code is given)
    Chapter,
    /// 4-digit heading
    Heading,
    /// 6-digit subheading
    Subheading,
}

impl HsLevel {
    /// Select the level for an HS code.
    ///
    /// Only lengths 0, 2, 4 and 6 are accepted.
    pub fn from_code(code: &str) -> Result<Self> {
        match code.chars().count() {
            0 | 2 => Ok(Self::Chapter),
            4 => Ok(Self::Heading),
            6 => Ok(Self::Subheading),
            length => Err(Error::InvalidHsCode {
                code: code.to_string(),
                length,
            }),
        }
    }

    /// Column name used for both `hsSgnGrpCol` and `hsSgnWhrCol`
    pub fn column(self) -> &'static str {
        match self {
            Self::Chapter => "HS2_SGN",
            Self::Heading => "HS4_SGN",
            Self::Subheading => "HS6_SGN",
        }
    }
}

// ============================================================================
// Trade Query
// ============================================================================

/// Search filters for one scraping run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeQuery {
    /// Period granularity (`priodKind`)
    pub period_kind: PeriodKind,
    /// First period, inclusive (`priodFr`)
    pub period_from: String,
    /// Last period, inclusive (`priodTo`)
    pub period_to: String,
    /// Response language (`langTpcd`)
    pub language: String,
    /// Weight unit code (`ttwgTpcd`)
    pub weight_unit: String,
    /// Rows per page (`showPagingLine`)
    pub page_size: u32,
    /// Sort column (`sortColumn`), empty for server order
    pub sort_column: String,
    /// Sort order (`sortOrder`), empty for server order
    pub sort_order: String,
    /// HS code filter (`hsSgn`), empty for all chapters
    pub hs_code: String,
    /// Country names (`cntyNm`), empty for all countries
    pub countries: Vec<String>,
}

impl Default for TradeQuery {
    fn default() -> Self {
        Self {
            period_kind: PeriodKind::Year,
            period_from: "2024".to_string(),
            period_to: "2024".to_string(),
            language: "ENG".to_string(),
            weight_unit: "1000".to_string(),
            page_size: 10_000,
            sort_column: String::new(),
            sort_order: String::new(),
            hs_code: String::new(),
            countries: Vec::new(),
        }
    }
}

impl TradeQuery {
    /// Create a query with default filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HS code
    #[must_use]
    pub fn hs_code(mut self, code: impl Into<String>) -> Self {
        self.hs_code = code.into();
        self
    }

    /// Add a country filter
    #[must_use]
    pub fn country(mut self, name: impl Into<String>) -> Self {
        self.countries.push(name.into());
        self
    }

    /// Set the period range
    #[must_use]
    pub fn period(
        mut self,
        kind: PeriodKind,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.period_kind = kind;
        self.period_from = from.into();
        self.period_to = to.into();
        self
    }

    /// Validate the filters and freeze them for page rendering
    pub fn prepare(&self) -> Result<PreparedQuery> {
        let level = HsLevel::from_code(&self.hs_code)?;

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        Ok(PreparedQuery {
            query: self.clone(),
            level,
        })
    }
}

// ============================================================================
// Prepared Query
// ============================================================================

/// A validated query that renders per-page payloads
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    query: TradeQuery,
    level: HsLevel,
}

impl PreparedQuery {
    /// The classification level in use
    pub fn level(&self) -> HsLevel {
        self.level
    }

    /// Form fields for one page, in the order the endpoint's own UI sends them
    pub fn form(&self, page: u32) -> FormPairs {
        let q = &self.query;
        let column = self.level.column();

        [
            ("priodKind", q.period_kind.as_str().to_string()),
            ("priodFr", q.period_from.clone()),
            ("priodTo", q.period_to.clone()),
            ("langTpcd", q.language.clone()),
            ("ttwgTpcd", q.weight_unit.clone()),
            ("selectPaging", page.to_string()),
            ("showPagingLine", q.page_size.to_string()),
            ("sortColumn", q.sort_column.clone()),
            ("sortOrder", q.sort_order.clone()),
            ("hsSgnGrpCol", column.to_string()),
            ("hsSgnWhrCol", column.to_string()),
            ("hsSgn", q.hs_code.clone()),
            ("cntyNm", q.countries.join(",")),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
    }
}
