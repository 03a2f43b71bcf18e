use meteostat_datasource::{candidate_stations, DatasourceError, DatasourceSettings, MeteostatDatasource};
use std::env;

#[tokio::main]
async fn main() -> Result<(), DatasourceError> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = DatasourceSettings::builder()
        .url(env::var("METEOSTAT_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()))
        .maybe_api_key(env::var("METEOSTAT_API_KEY").ok())
        .build();
    let datasource = MeteostatDatasource::new(settings)?;

    let health = datasource.test_datasource().await;
    if !health.is_success() {
        eprintln!("Health check failed: {}", health.message);
        return Ok(());
    }

    let term = env::args().nth(1).unwrap_or_else(|| "Amsterdam".to_string());
    for option in candidate_stations(&datasource, &term).await? {
        println!(
            "{:<8} {}",
            option.id().unwrap_or_default(),
            option.label.as_deref().unwrap_or_default()
        );
    }

    Ok(())
}
