use chrono::{Duration, NaiveDate};
use roadrisk::{AccidentRecord, AssessOptions, RiskIndex};

/// Simulated drive from Belgrade to Novi Sad: the route is interpolated into
/// per-step waypoints and the danger around the moving position is assessed
/// once per step, the way a visualization would query once per frame.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let index = RiskIndex::build(highway_history())?;
    println!(
        "Indexed {} accidents along the corridor\n",
        index.stats().records
    );

    let belgrade = (44.8125, 20.4612);
    let novi_sad = (45.2671, 19.8335);
    let route = interpolate(belgrade, novi_sad, 20);

    let departure = NaiveDate::from_ymd_opt(2025, 11, 5)
        .unwrap()
        .and_hms_opt(17, 0, 0)
        .unwrap();

    // Whole-trip view first: does the route pass near known accident sites?
    let trip = AssessOptions::new().with_route(route.clone()).with_radius_km(3.0);
    let overview = index.assess_with(belgrade.0, belgrade.1, departure, &trip)?;
    println!(
        "Route overview: {} ({} accident sites near the corridor)\n",
        overview.level, overview.total
    );

    // Then the per-frame loop: one position, one query, three minutes apart.
    let opts = AssessOptions::new().with_radius_km(3.0);
    for (step, &(lat, lon)) in route.iter().enumerate() {
        let now = departure + Duration::minutes(3 * step as i64);
        let result = index.assess_with(lat, lon, now, &opts)?;
        println!(
            "{} ({:.4}, {:.4})  {:10}  total={} time={} season={}",
            now.format("%H:%M"),
            lat,
            lon,
            result.level.to_string(),
            result.total,
            result.time_matched,
            result.season_matched
        );
    }

    Ok(())
}

fn interpolate(from: (f64, f64), to: (f64, f64), steps: usize) -> Vec<(f64, f64)> {
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            (
                from.0 + (to.0 - from.0) * t,
                from.1 + (to.1 - from.1) * t,
            )
        })
        .collect()
}

fn highway_history() -> Vec<AccidentRecord> {
    // Synthetic records clustered near the midpoint of the highway, mostly
    // evening accidents in late autumn.
    let mut records = Vec::new();
    let mut id = 0;
    for k in 0..6 {
        let lat = 45.03 + k as f64 * 0.004;
        let lon = 20.15 - k as f64 * 0.006;
        for year in [2022, 2023, 2024] {
            let ts = NaiveDate::from_ymd_opt(year, 11, 3 + k)
                .unwrap()
                .and_hms_opt(17, 10 + 5 * k, 0)
                .unwrap();
            records.push(AccidentRecord::new(id, lat, lon, ts));
            id += 1;
        }
    }
    records
}
