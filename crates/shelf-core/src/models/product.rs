use serde::{Deserialize, Serialize};

use super::ArgbColor;

/// Product record as persisted in the document store.
///
/// Field names are part of the stored document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f32,
    pub offer_percentage: Option<f32>,
    pub description: Option<String>,
    pub colors: Vec<ArgbColor>,
    pub sizes: Option<Vec<String>>,
    /// Photo URLs in the order their uploads completed, not selection order.
    pub images: Vec<String>,
}

/// A blob written to storage during a save attempt and the URL it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub key: String,
    pub url: String,
}
