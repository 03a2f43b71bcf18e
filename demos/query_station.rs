use chrono::NaiveDate;
use meteostat_datasource::{
    DatasourceError, DatasourceSettings, DateRange, LatLon, MeteostatDatasource, QueryRequest,
    QueryTarget, TIME_FIELD,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), DatasourceError> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = DatasourceSettings::builder()
        .url(env::var("METEOSTAT_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()))
        .maybe_api_key(env::var("METEOSTAT_API_KEY").ok())
        .build();
    let datasource = MeteostatDatasource::new(settings)?;

    let request = QueryRequest::builder()
        .targets(vec![
            QueryTarget::new("schiphol")
                .with_station("06240")
                .with_properties(["temp", "rhum", "wspd"]),
            QueryTarget::new("berlin")
                .with_coordinates(LatLon(52.52, 13.405))
                .with_properties(["temp", "prcp"]),
        ])
        .range(DateRange::from_dates(
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 7, 3).unwrap(),
        ))
        .build();

    let response = datasource.query(&request).await?;
    for frame in &response.data {
        let times = frame.field(TIME_FIELD).map(|field| &field.values[..]).unwrap_or_default();
        println!(
            "{} ({} rows, {:?} to {:?})",
            frame.ref_id,
            frame.len(),
            times.first(),
            times.last()
        );
        for field in &frame.fields {
            println!("  {:<28} {:?}", field.name, field.values.iter().take(3).collect::<Vec<_>>());
        }
    }

    Ok(())
}
