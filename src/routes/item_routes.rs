use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::any,
    Router,
};

use crate::errors::{ApiError, StoreError};
use crate::services::item_service;
use crate::state::item::ItemStore;

/// Build the four item routes. No method restriction is applied.
pub fn routes(store: ItemStore) -> Router {
    Router::new()
        .route("/create", any(create_item))
        .route("/read", any(read_item))
        .route("/update", any(update_item))
        .route("/delete", any(delete_item))
        .with_state(store)
}

/// Raw query string as ordered key/value pairs. Repeated keys are kept.
type QueryPairs = Query<Vec<(String, String)>>;

/// Query string shared by every item route.
///
/// A missing `item` reads as the empty string; a missing `price` is
/// rejected only by the routes that need one. When a key is repeated the
/// first value wins.
#[derive(Debug)]
pub struct ItemQuery {
    pub item: String,
    pub price: Option<String>,
}

impl ItemQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut item = None;
        let mut price = None;

        for (key, value) in pairs {
            match key.as_str() {
                "item" if item.is_none() => item = Some(value),
                "price" if price.is_none() => price = Some(value),
                _ => {}
            }
        }

        Self {
            item: item.unwrap_or_default(),
            price,
        }
    }

    fn price(&self) -> Result<f64, ApiError> {
        self.price
            .as_deref()
            .and_then(parse_price)
            .ok_or_else(|| ApiError::BadRequest("invalid price".to_string()))
    }
}

/// Parse a decimal price. Overflow is an error; infinity is only accepted
/// when spelled out.
fn parse_price(text: &str) -> Option<f64> {
    let price = text.parse::<f64>().ok()?;
    if price.is_infinite() {
        let unsigned = text.trim_start_matches(['+', '-']).to_ascii_lowercase();
        if unsigned != "inf" && unsigned != "infinity" {
            return None;
        }
    }
    Some(price)
}

type TextResponse = Result<(StatusCode, String), ApiError>;

fn with_dump(store: &ItemStore, status: StatusCode, headline: String) -> (StatusCode, String) {
    let dump = item_service::visualize(store);
    (status, format!("{headline}\n\n{dump}"))
}

fn bad_request(err: StoreError) -> ApiError {
    ApiError::BadRequest(err.to_string())
}

fn not_found(err: StoreError) -> ApiError {
    ApiError::NotFound(err.to_string())
}

//
// ─────────────────────────────────────────────────────────────
// /create?item=<name>&price=<decimal>
// 201 on success, 400 on bad price or existing item
// ─────────────────────────────────────────────────────────────
//
async fn create_item(
    State(store): State<ItemStore>,
    Query(pairs): QueryPairs,
) -> TextResponse
{
    let query = ItemQuery::from_pairs(pairs);
    let price = query.price()?;
    let name = query.item;

    item_service::create(&store, name.clone(), price).map_err(bad_request)?;

    Ok(with_dump(
        &store,
        StatusCode::CREATED,
        format!("Item created: {name}, Price: ${price:.2}"),
    ))
}

//
// ─────────────────────────────────────────────────────────────
// /read?item=<name>
// 200 with the item, 404 if absent
// ─────────────────────────────────────────────────────────────
//
async fn read_item(
    State(store): State<ItemStore>,
    Query(pairs): QueryPairs,
) -> TextResponse
{
    let query = ItemQuery::from_pairs(pairs);
    let item = item_service::read(&store, &query.item).map_err(not_found)?;

    Ok(with_dump(
        &store,
        StatusCode::OK,
        format!("Item found: {}, Price: ${:.2}", item.name, item.price),
    ))
}

//
// ─────────────────────────────────────────────────────────────
// /update?item=<name>&price=<decimal>
// 200 on success, 400 on bad price or missing item
// ─────────────────────────────────────────────────────────────
//
async fn update_item(
    State(store): State<ItemStore>,
    Query(pairs): QueryPairs,
) -> TextResponse
{
    let query = ItemQuery::from_pairs(pairs);
    let price = query.price()?;

    // Missing items answer 400 here, unlike /read and /delete.
    item_service::update(&store, &query.item, price).map_err(bad_request)?;

    Ok(with_dump(
        &store,
        StatusCode::OK,
        format!("Item updated: {}, New Price: ${price:.2}", query.item),
    ))
}

//
// ─────────────────────────────────────────────────────────────
// /delete?item=<name>
// 200 on success, 404 if absent
// ─────────────────────────────────────────────────────────────
//
async fn delete_item(
    State(store): State<ItemStore>,
    Query(pairs): QueryPairs,
) -> TextResponse
{
    let query = ItemQuery::from_pairs(pairs);
    item_service::delete(&store, &query.item).map_err(not_found)?;

    Ok(with_dump(
        &store,
        StatusCode::OK,
        format!("Item deleted: {}", query.item),
    ))
}
