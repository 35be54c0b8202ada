use goose::prelude::*;
use serde_json::json;
use std::env;

async fn get_health(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.get("/health/").await?;
    Ok(())
}

async fn post_basic_health(user: &mut GooseUser) -> TransactionResult {
    let _goose_metrics = user.post_json("/health/", &json!({})).await?;
    Ok(())
}

async fn post_detailed_health(user: &mut GooseUser) -> TransactionResult {
    let end_number: i64 = env::var("END_NUMBER")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let payload = json!({
        "service_name": "loadtest",
        "include_details": true,
        "start_number": 1,
        "end_number": end_number,
    });
    let _goose_metrics = user.post_json("/health/", &payload).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), GooseError> {
    println!(
        "Detailed health checks count to END_NUMBER={}",
        env::var("END_NUMBER").unwrap_or_else(|_| "10".to_string())
    );

    GooseAttack::initialize()?
        .register_scenario(scenario!("HealthCheck").register_transaction(transaction!(get_health)))
        .register_scenario(
            scenario!("SubmitHealthCheck")
                .register_transaction(transaction!(post_basic_health))
                .register_transaction(transaction!(post_detailed_health)),
        )
        .execute()
        .await?;

    Ok(())
}
