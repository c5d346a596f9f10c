use tracing::debug;

use crate::error::RanchError;
use crate::models::dashboard::DashboardResponse;
use crate::AppState;

/// Herd counts for the landing page
pub async fn herd_counts(state: &AppState) -> Result<DashboardResponse, RanchError> {
    let total = state.livestock.count_all().await?;
    let sold = state.livestock.count_sold().await?;
    let active = total.saturating_sub(sold);

    debug!(total, active, sold, "Dashboard counts");
    Ok(DashboardResponse { total, active, sold })
}
