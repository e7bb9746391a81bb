use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::{AppError, Result};

/// One laptop entry of the product catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaptopRecord {
    #[serde(deserialize_with = "text")]
    pub product_name: String,
    #[serde(deserialize_with = "text")]
    pub image: String,
    #[serde(deserialize_with = "text")]
    pub price: String,
    #[serde(deserialize_with = "text")]
    pub screen: String,
    #[serde(deserialize_with = "text")]
    pub cpu: String,
    #[serde(deserialize_with = "text")]
    pub storage: String,
    #[serde(deserialize_with = "text")]
    pub ram: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
}

// Catalog files mix quoted and bare numbers ("price": "1199" vs "price": 1199).
fn text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

/// The read-only catalog, indexed by position.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    laptops: Vec<LaptopRecord>,
}

impl Catalog {
    /// Reads and parses the catalog file. Called once at startup.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Cannot read catalog {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded {} laptops from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let laptops: Vec<LaptopRecord> = serde_json::from_str(json)?;
        Ok(Self { laptops })
    }

    /// Looks up a laptop by the raw `id` query value. Anything that is not an
    /// unsigned integer below the catalog length yields `None`.
    pub fn get(&self, id: &str) -> Option<&LaptopRecord> {
        let index = id.trim().parse::<usize>().ok()?;
        self.laptops.get(index)
    }

    pub fn len(&self) -> usize {
        self.laptops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laptops.is_empty()
    }

    pub fn laptops(&self) -> &[LaptopRecord] {
        &self.laptops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[
        {"id": "0", "productName": "Dell XPS 13", "image": "dell.jpg", "price": "1199",
         "screen": "13.3-inch", "cpu": "i7", "storage": "512 GB SSD", "ram": "16 GB",
         "description": "Small."},
        {"productName": "Apple MacBook", "image": "mac.jpg", "price": 1499,
         "screen": "13-inch", "cpu": "M1", "storage": "256 GB SSD", "ram": 8,
         "description": "Light."}
    ]"#;

    #[test]
    fn test_from_json_accepts_numbers_and_extra_fields() {
        let catalog = Catalog::from_json(DATA).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.laptops()[0].product_name, "Dell XPS 13");
        assert_eq!(catalog.laptops()[1].price, "1499");
        assert_eq!(catalog.laptops()[1].ram, "8");
    }

    #[test]
    fn test_get_bounds() {
        let catalog = Catalog::from_json(DATA).unwrap();
        assert_eq!(catalog.get("0").unwrap().cpu, "i7");
        assert_eq!(catalog.get("1").unwrap().cpu, "M1");
        assert!(catalog.get("2").is_none());
        assert!(catalog.get("-1").is_none());
        assert!(catalog.get("abc").is_none());
        assert!(catalog.get("").is_none());
        assert!(catalog.get("0.5").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(Catalog::from_json("{"), Err(AppError::ParseError(_))));
    }
}
