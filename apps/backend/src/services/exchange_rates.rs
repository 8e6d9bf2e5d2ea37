use crate::db::degradable_read;
use crate::error::AppError;
use crate::pagination::{Page, PageRequest};
use crate::repos::exchange_rates::{self, normalize_code, ExchangeRate};
use crate::state::app_state::AppState;

fn snapshot(state: &AppState) -> Vec<ExchangeRate> {
    let mut rates = state.fallback.exchange_rates();
    rates.sort_by(|a, b| a.currency_code.cmp(&b.currency_code));
    rates
}

pub async fn list(state: &AppState, req: PageRequest) -> Result<Page<ExchangeRate>, AppError> {
    match degradable_read(state.db(), |conn| exchange_rates::page(conn, req)).await? {
        Some(page) => Ok(page),
        None => Ok(Page::from_items(snapshot(state), req).mark_degraded()),
    }
}

pub async fn get(state: &AppState, code: &str) -> Result<ExchangeRate, AppError> {
    let code = normalize_code(code);
    let lookup = code.as_str();
    if let Some(rate) =
        degradable_read(state.db(), |conn| exchange_rates::find_by_code(conn, lookup)).await?
    {
        return Ok(rate);
    }
    snapshot(state)
        .into_iter()
        .find(|r| r.currency_code == code)
        .ok_or_else(|| AppError::store_unavailable("exchange rate store unavailable"))
}
