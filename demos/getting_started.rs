use chrono::NaiveDate;
use roadrisk::{AccidentRecord, AssessOptions, RiskIndex};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== RoadRisk - Getting Started ===\n");

    // A handful of historical accidents around central Belgrade.
    let records = vec![
        accident(1, 44.8130, 20.4620, 2023, 11, 3, 17, 40),
        accident(2, 44.8140, 20.4605, 2022, 11, 12, 18, 5),
        accident(3, 44.8118, 20.4633, 2024, 10, 28, 17, 15),
        accident(4, 44.8301, 20.4790, 2023, 6, 2, 9, 30),
        accident(5, 45.2671, 19.8335, 2024, 11, 1, 17, 50),
    ];

    let index = RiskIndex::build(records)?;
    println!(
        "✓ Indexed {} records across {} cells ({} skipped)\n",
        index.stats().records,
        index.stats().cells,
        index.stats().skipped
    );

    // Rush hour in early November, at the city center.
    let at = NaiveDate::from_ymd_opt(2025, 11, 5)
        .unwrap()
        .and_hms_opt(17, 30, 0)
        .unwrap();

    let result = index.assess(44.8125, 20.4612, at)?;
    println!("Danger at the city center: {}", result.level);
    println!("   nearby accidents:   {}", result.total);
    println!("   same time of day:   {}", result.time_matched);
    println!("   same season:        {}", result.season_matched);

    // The same query with per-accident diagnostics.
    let opts = AssessOptions::new().with_radius_km(2.0).with_details();
    let detailed = index.assess_with(44.8125, 20.4612, at, &opts)?;
    println!("\nWithin 2 km, closest first:");
    for detail in &detailed.details {
        println!(
            "   #{:<3} {:.2} km away, {:.1} h apart, {} days off season",
            detail.id, detail.distance_km, detail.hours_from_now, detail.days_from_seasonal_center
        );
    }

    Ok(())
}

fn accident(
    id: u64,
    lat: f64,
    lon: f64,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> AccidentRecord {
    let ts = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    AccidentRecord::new(id, lat, lon, ts)
}
