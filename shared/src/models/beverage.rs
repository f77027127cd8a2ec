//! Beverage & Beverage Size Models

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Beverage entity (饮品)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Beverage {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Beverage size entity (规格：Small / Medium / Large)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BeverageSize {
    pub id: i64,
    pub beverage_id: i64,
    pub size: String,
    pub price: f64,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Beverage with its sizes (API response)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeverageDetail {
    #[serde(flatten)]
    pub beverage: Beverage,
    pub sizes: Vec<BeverageSize>,
}

impl BeverageDetail {
    /// Size with the given id, only if it is currently orderable
    pub fn available_size(&self, size_id: i64) -> Option<&BeverageSize> {
        self.sizes
            .iter()
            .find(|s| s.id == size_id && s.is_available)
    }
}

/// Create beverage payload (sizes may be created in the same request)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeverageCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default)]
    #[validate(nested)]
    pub sizes: Vec<BeverageSizeCreate>,
}

/// Update beverage payload (absent fields are left unchanged)
///
/// `description`: absent → keep, `null` → clear, string → replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeverageUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Create size payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeverageSizeCreate {
    #[validate(length(min = 1, max = 50))]
    pub size: String,
    #[serde(deserialize_with = "price_from_number_or_string")]
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub price: f64,
    pub is_available: Option<bool>,
}

/// Update size payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeverageSizeUpdate {
    #[validate(length(min = 1, max = 50))]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "optional_price_from_number_or_string")]
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub price: Option<f64>,
    pub is_available: Option<bool>,
}

/// Catalog list query (`?includeInactive=true`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeverageListQuery {
    #[serde(default, alias = "include_inactive")]
    pub include_inactive: bool,
}

/// Present-but-null → `Some(None)`; an absent field falls back to `default`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_price<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid price: {s}"))),
        }
    }
}

/// Accept prices as `3.5` or `"3.50"`
fn price_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_price()
}

fn optional_price_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_price)
        .transpose()
}
