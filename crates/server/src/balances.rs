use api_types::balance::{Balance, BalancesResponse};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, identity::Identity, server::ServerState};

pub async fn get(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<BalancesResponse>, ServerError> {
    let sheet = state.engine.balances(identity.user_id).await?;

    Ok(Json(BalancesResponse {
        user_id: sheet.user_id,
        currency: sheet.currency.to_string(),
        balances: sheet
            .balances
            .into_iter()
            .map(|balance| Balance {
                other_user_id: balance.other_user_id,
                amount: balance.amount.to_string(),
            })
            .collect(),
    }))
}
