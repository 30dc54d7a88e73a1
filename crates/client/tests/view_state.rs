//! `ViewState` and `UploadForm` driven against a live API server.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use pricebook_client::form::{UploadForm, USER_CREATED_MESSAGE, USER_UPDATED_MESSAGE};
use pricebook_client::probe::{AccountProbe, ProbeOutcome};
use pricebook_client::state::{ViewState, PRODUCTS_LOAD_ERROR, SPECIAL_PRICES_LOAD_ERROR};
use pricebook_client::toast::{ToastKind, Toasts};
use pricebook_client::PricebookApi;
use pricebook_core::requests::{CreateSpecialPrice, OverrideInput};

async fn seed_account(api: &dyn PricebookApi) {
    api.create_special_price(&CreateSpecialPrice {
        email: "ana@b.com".into(),
        user: "Ana".into(),
        products: vec![OverrideInput::new("ABC123", 7.5)],
    })
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

#[tokio::test]
async fn selected_account_prices_the_catalog() {
    let client = common::spawn_server().await;
    seed_account(&client).await;

    let mut state = ViewState::new();
    state.load_products(&client).await;
    state.load_users(&client).await;
    state.select_user_by_email(&client, Some("ana@b.com")).await;

    assert_eq!(state.special_price_for("ABC123"), Some(7.5));
    assert_eq!(state.special_price_for("DEF456"), None);

    let widget = state
        .catalog_rows()
        .into_iter()
        .find(|r| r.sku == "ABC123")
        .unwrap();
    assert_eq!(widget.list_price, 10.0);
    assert_eq!(widget.effective_price(), 7.5);
    assert!(state.toasts.is_empty());

    state.select_user(&client, None).await;
    assert!(state.special_prices.is_none());
    assert_eq!(state.special_price_for("ABC123"), None);
}

#[tokio::test]
async fn failed_refresh_keeps_loaded_data() {
    let client = common::spawn_server().await;
    let dead = common::unreachable_client().await;

    let mut state = ViewState::new();
    state.load_products(&client).await;
    assert_eq!(state.products.len(), 3);

    state.load_products(&dead).await;

    assert_eq!(state.products.len(), 3);
    assert!(!state.loading.products);
    let toast = state.toasts.latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, PRODUCTS_LOAD_ERROR);
}

#[tokio::test]
async fn failed_special_price_fetch_clears_view() {
    let client = common::spawn_server().await;
    seed_account(&client).await;

    let mut state = ViewState::new();
    state.load_users(&client).await;
    state.select_user_by_email(&client, Some("ana@b.com")).await;
    assert!(state.special_prices.is_some());

    let dead = common::unreachable_client().await;
    state.select_user_by_email(&dead, Some("ana@b.com")).await;

    assert!(state.special_prices.is_none());
    assert_eq!(state.toasts.latest().unwrap().message, SPECIAL_PRICES_LOAD_ERROR);
}

// ---------------------------------------------------------------------------
// UploadForm + AccountProbe
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_update_through_the_form() {
    let client = common::spawn_server().await;
    let probe = AccountProbe::new(Duration::from_millis(5));
    let catalog = client.list_products().await.unwrap();
    let mut toasts = Toasts::new();

    // New account.
    let mut form = UploadForm::new();
    form.email = "Bo@B.com".into();
    let outcome = probe.probe(&client, &form.email).await;
    assert_eq!(outcome, ProbeOutcome::NewAccount);
    form.apply_probe(outcome, &catalog);

    form.user = "Bo".into();
    form.set_row_product(0, "GHI789");
    form.set_row_price(0, "0.25");
    let created = form.submit(&client, &mut toasts).await.unwrap();

    assert_eq!(created.email, "bo@b.com");
    assert_eq!(toasts.latest().unwrap().message, USER_CREATED_MESSAGE);
    assert_eq!(form, UploadForm::new());

    // Same email again: the probe finds it and the form switches to update.
    form.email = "bo@b.com".into();
    let outcome = probe.probe(&client, &form.email).await;
    assert_matches!(outcome, ProbeOutcome::Existing(_));
    form.apply_probe(outcome, &catalog);
    assert!(form.is_update());
    assert_eq!(form.rows()[0].sku, "GHI789");

    form.set_row_price(0, "0.2");
    let updated = form.submit(&client, &mut toasts).await.unwrap();

    assert_eq!(updated.products[0].special_price, 0.2);
    assert_eq!(toasts.latest().unwrap().message, USER_UPDATED_MESSAGE);
    assert!(!form.is_update());
}

#[tokio::test]
async fn rejected_submit_keeps_the_form() {
    let client = common::spawn_server().await;
    seed_account(&client).await;
    let mut toasts = Toasts::new();

    let mut form = UploadForm::new();
    form.email = "ana@b.com".into();
    form.user = "Ana".into();
    form.set_row_product(0, "DEF456");
    form.set_row_price(0, "20");

    // Not probed, so this is a create that hits the duplicate email.
    let err = form.submit(&client, &mut toasts).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Error);
    assert_eq!(
        toasts.latest().unwrap().message,
        "Duplicate resource: email already exists"
    );
    assert_eq!(form.rows()[0].sku, "DEF456");
}

#[tokio::test]
async fn invalid_form_is_not_sent() {
    let dead = common::unreachable_client().await;
    let mut toasts = Toasts::new();
    let mut form = UploadForm::new();
    form.email = "ana@b.com".into();

    let err = form.submit(&dead, &mut toasts).await.unwrap_err();

    assert_matches!(err, pricebook_client::ClientError::Form(_));
    assert_eq!(toasts.latest().unwrap().message, "Username is required");
}
