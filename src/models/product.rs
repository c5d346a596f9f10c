use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Injection,
    Vitamin,
    Other,
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "injection" => Ok(ProductCategory::Injection),
            "vitamin" => Ok(ProductCategory::Vitamin),
            "other" => Ok(ProductCategory::Other),
            other => Err(format!("unknown product category: {}", other)),
        }
    }
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Injection => "injection",
            ProductCategory::Vitamin => "vitamin",
            ProductCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
}

/// Body of POST /api/products and PUT /api/products/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Injection".parse::<ProductCategory>(), Ok(ProductCategory::Injection));
        assert_eq!(" vitamin".parse::<ProductCategory>(), Ok(ProductCategory::Vitamin));
        assert!("pill".parse::<ProductCategory>().is_err());

        for category in [ProductCategory::Injection, ProductCategory::Vitamin, ProductCategory::Other] {
            assert_eq!(category.as_str().parse::<ProductCategory>(), Ok(category));
        }
    }
}
