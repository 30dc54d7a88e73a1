//! Request payloads for the special-price endpoints.
//!
//! Payloads are normalized (trimmed, case-folded) before validation so the
//! length and pattern rules apply to what will actually be stored.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::account::OverrideEntry;
use crate::error::{CoreError, FieldError};
use crate::keys::{normalize_email, normalize_sku, EMAIL_PATTERN};

/// One `{sku, specialPrice}` item in a create or update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OverrideInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    #[validate(range(min = 0.0, message = "Special price must be greater than or equal to 0"))]
    pub special_price: f64,
}

impl OverrideInput {
    pub fn new(sku: impl Into<String>, special_price: f64) -> Self {
        Self {
            sku: sku.into(),
            special_price,
        }
    }

    fn normalized(&self) -> Self {
        Self {
            sku: normalize_sku(&self.sku),
            special_price: self.special_price,
        }
    }

    fn to_entry(&self) -> OverrideEntry {
        OverrideEntry {
            sku: normalize_sku(&self.sku),
            special_price: self.special_price,
        }
    }
}

/// `POST /special-prices` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateSpecialPrice {
    #[serde(default)]
    #[validate(regex(path = *EMAIL_PATTERN, message = "Must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 2, max = 100, message = "Username must be between 2 and 100 characters"))]
    pub user: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Must include at least one product"), nested)]
    pub products: Vec<OverrideInput>,
}

impl CreateSpecialPrice {
    /// Trimmed, lowercase email, trimmed user and uppercase SKUs.
    pub fn normalized(&self) -> Self {
        Self {
            email: normalize_email(&self.email),
            user: self.user.trim().to_string(),
            products: self.products.iter().map(OverrideInput::normalized).collect(),
        }
    }

    /// Normalize, then run the field rules.
    pub fn validated(&self) -> Result<Self, CoreError> {
        let input = self.normalized();
        input.validate().map_err(into_core_error)?;
        Ok(input)
    }

    pub fn entries(&self) -> Vec<OverrideEntry> {
        self.products.iter().map(OverrideInput::to_entry).collect()
    }
}

/// `PUT /special-prices/{email}` body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateSpecialPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100, message = "Username must be between 2 and 100 characters"))]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Must include at least one product"), nested)]
    pub products: Option<Vec<OverrideInput>>,
}

impl UpdateSpecialPrice {
    pub fn normalized(&self) -> Self {
        Self {
            user: self.user.as_deref().map(|u| u.trim().to_string()),
            products: self
                .products
                .as_ref()
                .map(|items| items.iter().map(OverrideInput::normalized).collect()),
        }
    }

    pub fn validated(&self) -> Result<Self, CoreError> {
        let input = self.normalized();
        input.validate().map_err(into_core_error)?;
        Ok(input)
    }

    /// Replacement override list, or `None` when the list must stay as is.
    ///
    /// An empty list counts as "not supplied".
    pub fn entries(&self) -> Option<Vec<OverrideEntry>> {
        self.products
            .as_ref()
            .filter(|items| !items.is_empty())
            .map(|items| items.iter().map(OverrideInput::to_entry).collect())
    }
}

/// Flatten `validator` output into sorted `{field, message}` pairs.
///
/// Nested list errors are reported with index paths such as
/// `products[1].specialPrice`.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    flatten("", errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    out
}

fn into_core_error(errors: ValidationErrors) -> CoreError {
    CoreError::InvalidInput(field_errors(&errors))
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let name = wire_name(field);
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    flatten(&format!("{path}[{idx}]"), inner, out);
                }
            }
        }
    }
}

/// Report Rust field names under their JSON names.
fn wire_name(field: &str) -> String {
    match field {
        "special_price" => "specialPrice".to_string(),
        other => other.to_string(),
    }
}
