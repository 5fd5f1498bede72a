//! Classification record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ewaste_core::{ClassificationId, UserId};

use crate::error::{ValidationError, require_text};

/// Upper bound of the confidence scale.
pub const MAX_CONFIDENCE: f64 = 100.0;

/// A stored classification result for one piece of e-waste.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Unique record id.
    pub id: ClassificationId,
    /// Owner of the record.
    pub user_id: UserId,
    /// Reference to the photographed item.
    pub image_url: String,
    /// Recognized object, e.g. "Laptop Battery".
    pub object_name: String,
    /// Broad category, e.g. "Battery".
    pub category: String,
    /// Hazardous materials found, in display order. May repeat.
    pub hazardous_elements: Vec<String>,
    /// Classifier confidence, 0-100.
    pub confidence: f64,
    /// When the record was stored.
    pub created_at: DateTime<Utc>,
}

impl Classification {
    /// Whether the record lists any hazardous material.
    #[must_use]
    pub fn is_hazardous(&self) -> bool {
        !self.hazardous_elements.is_empty()
    }
}

/// A classification submitted for storage; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassification {
    pub user_id: UserId,
    pub image_url: String,
    pub object_name: String,
    pub category: String,
    pub hazardous_elements: Vec<String>,
    pub confidence: f64,
}

impl NewClassification {
    /// Check the record's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: blank object name or
    /// category, confidence outside `0..=100` (or not finite), an empty
    /// hazardous element list, or a blank element.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.object_name, "objectName")?;
        require_text(&self.category, "category")?;

        if !self.confidence.is_finite() || !(0.0..=MAX_CONFIDENCE).contains(&self.confidence) {
            return Err(ValidationError::ConfidenceOutOfRange(self.confidence));
        }

        if self.hazardous_elements.is_empty() {
            return Err(ValidationError::NoHazardousElements);
        }

        if let Some(index) = self
            .hazardous_elements
            .iter()
            .position(|e| e.trim().is_empty())
        {
            return Err(ValidationError::BlankHazardousElement { index });
        }

        Ok(())
    }

    /// Stamp the submission into a stored record.
    #[must_use]
    pub fn into_record(self, id: ClassificationId, created_at: DateTime<Utc>) -> Classification {
        Classification {
            id,
            user_id: self.user_id,
            image_url: self.image_url,
            object_name: self.object_name,
            category: self.category,
            hazardous_elements: self.hazardous_elements,
            confidence: self.confidence,
            created_at,
        }
    }
}
