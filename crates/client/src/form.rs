//! The special-price upload form.
//!
//! Holds raw user input (email, user name, rows of product pick and price
//! text), validates it locally, and submits it as a create or an update
//! depending on what the account probe found.

use std::collections::HashSet;

use pricebook_core::account::{AccountSummary, AccountView, SpecialPriceAccount};
use pricebook_core::catalog::ProductSummary;
use pricebook_core::keys::normalize_email;
use pricebook_core::requests::{CreateSpecialPrice, OverrideInput, UpdateSpecialPrice};

use crate::api::PricebookApi;
use crate::error::{ClientError, ClientResult};
use crate::probe::ProbeOutcome;
use crate::toast::Toasts;

pub const USER_CREATED_MESSAGE: &str = "User created successfully";
pub const USER_UPDATED_MESSAGE: &str = "User updated successfully";

/// One product line: the picked SKU (empty until chosen) and the price text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRow {
    pub sku: String,
    pub special_price: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    pub email: String,
    pub user: String,
    rows: Vec<PriceRow>,
    existing: Option<AccountView>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            user: String::new(),
            rows: vec![PriceRow::default()],
            existing: None,
        }
    }
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// The account being edited, when the probe found one.
    pub fn existing(&self) -> Option<&AccountView> {
        self.existing.as_ref()
    }

    pub fn is_update(&self) -> bool {
        self.existing.is_some()
    }

    pub fn add_row(&mut self) {
        self.rows.push(PriceRow::default());
    }

    /// Remove row `index`. The last remaining row is never removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    pub fn set_row_product(&mut self, index: usize, sku: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.sku = sku.into();
        }
    }

    pub fn set_row_price(&mut self, index: usize, price: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.special_price = price.into();
        }
    }

    /// Fill an empty user name from the account list when the typed email
    /// matches a known account.
    pub fn prefill_user(&mut self, users: &[AccountSummary]) {
        if !self.user.trim().is_empty() {
            return;
        }
        let email = normalize_email(&self.email);
        if let Some(known) = users.iter().find(|u| u.email == email) {
            self.user = known.user.clone();
        }
    }

    /// Apply a probe result.
    ///
    /// An existing account switches the form to update mode and loads its
    /// user name and overrides; SKUs missing from `catalog` come back as
    /// unpicked rows. Superseded results are ignored.
    pub fn apply_probe(&mut self, outcome: ProbeOutcome, catalog: &[ProductSummary]) {
        match outcome {
            ProbeOutcome::Existing(view) => {
                self.user = view.user.clone();
                self.rows = view
                    .products
                    .iter()
                    .map(|entry| PriceRow {
                        sku: if catalog.iter().any(|p| p.sku == entry.sku) {
                            entry.sku.clone()
                        } else {
                            String::new()
                        },
                        special_price: entry.special_price.to_string(),
                    })
                    .collect();
                if self.rows.is_empty() {
                    self.rows.push(PriceRow::default());
                }
                self.existing = Some(view);
            }
            ProbeOutcome::NewAccount => self.existing = None,
            ProbeOutcome::Superseded => {}
        }
    }

    /// Check the input, returning the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if !self.email.contains('@') {
            return Err("Invalid email format".to_string());
        }
        if self.user.trim().is_empty() {
            return Err("Username is required".to_string());
        }
        if self.rows.is_empty() {
            return Err("At least one product is required".to_string());
        }

        for (i, row) in self.rows.iter().enumerate() {
            let n = i + 1;
            if row.sku.trim().is_empty() {
                return Err(format!("Product {n} must be selected"));
            }
            if row.special_price.trim().is_empty() {
                return Err(format!("Special price for product {n} is required"));
            }
            if parse_price(&row.special_price).is_none() {
                return Err(format!(
                    "Special price for product {n} must be a valid number >= 0"
                ));
            }
        }

        let mut seen = HashSet::new();
        if !self.rows.iter().all(|row| seen.insert(row.sku.trim())) {
            return Err("Duplicate products are not allowed".to_string());
        }

        Ok(())
    }

    /// Validated, normalized create request.
    pub fn to_request(&self) -> ClientResult<CreateSpecialPrice> {
        self.validate().map_err(ClientError::Form)?;

        let products = self
            .rows
            .iter()
            .map(|row| OverrideInput::new(row.sku.trim(), parse_price(&row.special_price).unwrap_or(0.0)))
            .collect();

        Ok(CreateSpecialPrice {
            email: normalize_email(&self.email),
            user: self.user.trim().to_string(),
            products,
        })
    }

    /// Validate and send the form.
    ///
    /// Updates the probed account if there is one, creates otherwise. Every
    /// outcome raises a toast; the form resets to a single empty row only
    /// after the server confirms the write.
    pub async fn submit(
        &mut self,
        api: &dyn PricebookApi,
        toasts: &mut Toasts,
    ) -> ClientResult<SpecialPriceAccount> {
        let request = match self.to_request() {
            Ok(request) => request,
            Err(e) => {
                toasts.error(e.to_string());
                return Err(e);
            }
        };

        let result = if self.is_update() {
            let update = UpdateSpecialPrice {
                user: Some(request.user.clone()),
                products: Some(request.products.clone()),
            };
            api.update_special_price(&request.email, &update).await
        } else {
            api.create_special_price(&request).await
        };

        match result {
            Ok(account) => {
                let message = if self.is_update() {
                    USER_UPDATED_MESSAGE
                } else {
                    USER_CREATED_MESSAGE
                };
                tracing::info!(email = %account.email, update = self.is_update(), "Special prices submitted");
                toasts.success(message);
                self.reset();
                Ok(account)
            }
            Err(e) => {
                toasts.error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A finite, non-negative price, or `None`.
fn parse_price(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pricebook_core::account::ResolvedOverride;

    use super::*;

    fn filled() -> UploadForm {
        let mut form = UploadForm::new();
        form.email = " Ana@B.com ".into();
        form.user = " Ana ".into();
        form.set_row_product(0, "ABC123");
        form.set_row_price(0, "7.5");
        form
    }

    fn summary(sku: &str) -> ProductSummary {
        ProductSummary {
            sku: sku.into(),
            name: sku.into(),
            description: None,
            price: 1.0,
            base_price: 1.0,
            category: None,
            stock: 0,
            image: None,
            brand: None,
            rating: 0.0,
        }
    }

    #[test]
    fn checks_run_in_order() {
        let mut form = UploadForm::new();
        assert_eq!(form.validate().unwrap_err(), "Email is required");

        form.email = "ana".into();
        assert_eq!(form.validate().unwrap_err(), "Invalid email format");

        form.email = "ana@b.com".into();
        assert_eq!(form.validate().unwrap_err(), "Username is required");

        form.user = "Ana".into();
        assert_eq!(form.validate().unwrap_err(), "Product 1 must be selected");

        form.set_row_product(0, "ABC123");
        assert_eq!(form.validate().unwrap_err(), "Special price for product 1 is required");

        form.set_row_price(0, "-2");
        assert_eq!(
            form.validate().unwrap_err(),
            "Special price for product 1 must be a valid number >= 0"
        );

        form.set_row_price(0, "abc");
        assert!(form.validate().is_err());

        form.set_row_price(0, "0");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn duplicate_picks_are_rejected() {
        let mut form = filled();
        form.add_row();
        form.set_row_product(1, "ABC123");
        form.set_row_price(1, "5");

        assert_eq!(form.validate().unwrap_err(), "Duplicate products are not allowed");
    }

    #[test]
    fn request_is_normalized() {
        let request = filled().to_request().unwrap();

        assert_eq!(request.email, "ana@b.com");
        assert_eq!(request.user, "Ana");
        assert_eq!(request.products, vec![OverrideInput::new("ABC123", 7.5)]);
    }

    #[test]
    fn invalid_form_yields_form_error() {
        let err = UploadForm::new().to_request().unwrap_err();
        assert!(matches!(err, ClientError::Form(msg) if msg == "Email is required"));
    }

    #[test]
    fn last_row_cannot_be_removed() {
        let mut form = UploadForm::new();
        assert!(!form.remove_row(0));

        form.add_row();
        assert!(form.remove_row(0));
        assert_eq!(form.rows().len(), 1);
    }

    #[test]
    fn existing_account_loads_into_rows() {
        let now = Utc::now();
        let view = AccountView {
            id: 3,
            email: "ana@b.com".into(),
            user: "Ana".into(),
            created_at: now,
            updated_at: now,
            products: vec![
                ResolvedOverride {
                    sku: "ABC123".into(),
                    special_price: 7.5,
                    product: None,
                },
                ResolvedOverride {
                    sku: "GONE1".into(),
                    special_price: 2.0,
                    product: None,
                },
            ],
        };

        let mut form = UploadForm::new();
        form.email = "ana@b.com".into();
        form.apply_probe(ProbeOutcome::Existing(view), &[summary("ABC123")]);

        assert!(form.is_update());
        assert_eq!(form.user, "Ana");
        assert_eq!(
            form.rows(),
            &[
                PriceRow {
                    sku: "ABC123".into(),
                    special_price: "7.5".into()
                },
                PriceRow {
                    sku: String::new(),
                    special_price: "2".into()
                },
            ]
        );

        form.apply_probe(ProbeOutcome::Superseded, &[]);
        assert!(form.is_update());
        form.apply_probe(ProbeOutcome::NewAccount, &[]);
        assert!(!form.is_update());
    }

    #[test]
    fn prefill_only_fills_an_empty_name() {
        let users = vec![AccountSummary {
            email: "ana@b.com".into(),
            user: "Ana".into(),
        }];

        let mut form = UploadForm::new();
        form.email = "ANA@b.com".into();
        form.prefill_user(&users);
        assert_eq!(form.user, "Ana");

        form.user = "Custom".into();
        form.prefill_user(&users);
        assert_eq!(form.user, "Custom");
    }
}
