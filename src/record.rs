//! Trade statistics records
//!
//! One row of the endpoint's result grid, reduced to the fields we export.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Deserializer, Serialize};

/// A single trade statistics row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Statistics period, e.g. `2024`
    #[serde(rename = "priodTitle", default, deserialize_with = "cell")]
    pub period: String,
    /// Partner country
    #[serde(rename = "cntyEnglNm", default, deserialize_with = "cell")]
    pub country: String,
    /// Commodity description
    #[serde(rename = "englPrlstNm", default, deserialize_with = "cell")]
    pub goods: String,
    /// Export weight in tons
    #[serde(rename = "expTtwg", default, deserialize_with = "cell")]
    pub export_weight: String,
    /// Export value in thousand USD
    #[serde(rename = "expUsdAmt", default, deserialize_with = "cell")]
    pub export_value: String,
    /// Import weight in tons
    #[serde(rename = "impTtwg", default, deserialize_with = "cell")]
    pub import_weight: String,
    /// Import value in thousand USD
    #[serde(rename = "impUsdAmt", default, deserialize_with = "cell")]
    pub import_value: String,
    /// Balance of trade in thousand USD
    #[serde(rename = "cmtrBlncAmt", default, deserialize_with = "cell")]
    pub trade_balance: String,
}

impl TradeRecord {
    /// Build a record from one response item
    pub fn from_item(item: &JsonValue) -> Result<Self> {
        if !item.is_object() {
            return Err(Error::decode(format!("Expected an object item, got {item}")));
        }
        Ok(Self::deserialize(item)?)
    }

    /// Field values in export column order (without the scrape timestamp)
    pub fn values(&self) -> [&str; 8] {
        [
            &self.period,
            &self.country,
            &self.goods,
            &self.export_weight,
            &self.export_value,
            &self.import_weight,
            &self.import_value,
            &self.trade_balance,
        ]
    }
}

/// Render any JSON scalar as cell text; null becomes an empty cell
fn cell<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s,
        other => other.to_string(),
    })
}
