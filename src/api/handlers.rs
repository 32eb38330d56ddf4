// Expense operation handlers
// List/filter, create and delete against the shared store

use chrono::Utc;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};

use super::parse::{parse_float_prefix, parse_int_prefix};
use super::response::{envelope_response, error_response};
use super::types::{CreateExpenseRequest, Envelope};
use crate::config::AppState;
use crate::error::{ApiError, ApiResult};
use crate::http::QueryParams;
use crate::logger;
use crate::store::{round_cents, Expense, ExpenseFilter};

const FETCH_FAILED: &str = "Failed to fetch expenses";
const ADD_FAILED: &str = "Failed to add expense";
const DELETE_FAILED: &str = "Failed to delete expense";

const ADDED: &str = "Expense added successfully";
const DELETED: &str = "Expense deleted successfully";
const ID_REQUIRED: &str = "Expense ID is required";
const NOT_FOUND: &str = "Expense not found";

/// Result of a list query
#[derive(Debug)]
struct Listing {
    expenses: Vec<Expense>,
    total: f64,
}

/// GET: filtered list with total and count
pub async fn handle_list(query: &QueryParams, state: &AppState) -> Response<Full<Bytes>> {
    match list_expenses(query, state).await {
        Ok(listing) => {
            let count = listing.expenses.len();
            envelope_response(
                StatusCode::OK,
                &Envelope::listing(listing.expenses, listing.total, count),
                FETCH_FAILED,
            )
        }
        Err(e) => error_response(&e, FETCH_FAILED),
    }
}

/// POST: validate the body and append a new record
pub async fn handle_create<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match create_expense(req, state).await {
        Ok(expense) => envelope_response(
            StatusCode::CREATED,
            &Envelope::created(expense, ADDED),
            ADD_FAILED,
        ),
        Err(e) => error_response(&e, ADD_FAILED),
    }
}

/// DELETE: remove the record named by `?id=`
pub async fn handle_delete(query: &QueryParams, state: &AppState) -> Response<Full<Bytes>> {
    match delete_expense(query, state).await {
        Ok(()) => envelope_response(StatusCode::OK, &Envelope::message(DELETED), DELETE_FAILED),
        Err(e) => error_response(&e, DELETE_FAILED),
    }
}

/// Build the filter from query parameters.
///
/// Numeric bounds that do not parse are skipped rather than rejected.
fn filter_from_query(query: &QueryParams) -> ExpenseFilter {
    ExpenseFilter {
        category: query.non_empty("category").map(str::to_string),
        min_amount: query.non_empty("minAmount").and_then(parse_float_prefix),
        max_amount: query.non_empty("maxAmount").and_then(parse_float_prefix),
    }
}

async fn list_expenses(query: &QueryParams, state: &AppState) -> ApiResult<Listing> {
    let filter = filter_from_query(query);
    let expenses = state.store.read().await.list(&filter);

    let total = round_cents(expenses.iter().map(|e| e.amount).sum());
    if !total.is_finite() {
        return Err(ApiError::internal(format!(
            "Expense total overflowed over {} records",
            expenses.len()
        )));
    }

    Ok(Listing { expenses, total })
}

async fn create_expense<B>(req: Request<B>, state: &AppState) -> ApiResult<Expense>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(state.config.http.max_body_size).unwrap_or(usize::MAX);
    let body = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            return Err(ApiError::PayloadTooLarge);
        }
        Err(e) => return Err(ApiError::internal(format!("Failed to read request body: {e}"))),
    };

    let new = CreateExpenseRequest::from_slice(&body)?.validate(Utc::now().date_naive())?;

    let expense = state.store.write().await.insert(new);
    logger::log_debug(&format!(
        "[Store] Added expense {} ({} {:.2})",
        expense.id, expense.category, expense.amount
    ));
    Ok(expense)
}

async fn delete_expense(query: &QueryParams, state: &AppState) -> ApiResult<()> {
    let raw = query
        .non_empty("id")
        .ok_or_else(|| ApiError::validation(ID_REQUIRED))?;

    // An id that does not parse matches nothing
    let removed = match parse_int_prefix(raw).and_then(|id| u64::try_from(id).ok()) {
        Some(id) => state.store.write().await.remove(id),
        None => 0,
    };

    if removed == 0 {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    logger::log_debug(&format!("[Store] Deleted {removed} expense(s) with id {raw}"));
    Ok(())
}
