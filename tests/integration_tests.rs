use chrono::{NaiveDate, NaiveDateTime};
use roadrisk::{AccidentRecord, AssessOptions, Config, DangerLevel, RiskError, RiskIndex};

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

#[test]
fn test_build_and_basic_assess() {
    let when = ts(2024, 6, 15, 17, 30);
    let index = RiskIndex::build(vec![
        AccidentRecord::new(1, 44.8130, 20.4620, when),
        AccidentRecord::new(2, 44.8140, 20.4605, when),
        AccidentRecord::new(3, 44.8150, 20.4630, when),
    ])
    .unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index.stats().records, 3);
    assert_eq!(index.stats().skipped, 0);

    let result = index.assess(44.8125, 20.4612, when).unwrap();
    assert_eq!(result.total, 3);
    assert_eq!(result.time_matched, 3);
    assert_eq!(result.season_matched, 3);
}

/// Three records within 1 km of the query point, all within ±30 min of the
/// query time and ±10 days of its day of year: total = 3 falls short of the
/// count-only DANGEROUS branch, but the clustered branch (time >= 2 and
/// season >= 3) upgrades it from MODERATE.
#[test]
fn test_clustered_records_upgrade_to_dangerous() {
    let index = RiskIndex::build(vec![
        AccidentRecord::new(1, 44.8130, 20.4620, ts(2023, 6, 10, 17, 10)),
        AccidentRecord::new(2, 44.8140, 20.4605, ts(2022, 6, 20, 17, 50)),
        AccidentRecord::new(3, 44.8120, 20.4630, ts(2024, 6, 18, 17, 25)),
    ])
    .unwrap();

    let result = index.assess(44.8125, 20.4612, ts(2024, 6, 15, 17, 30)).unwrap();
    assert_eq!(result.total, 3);
    assert_eq!(result.time_matched, 3);
    assert_eq!(result.season_matched, 3);
    assert_eq!(result.level, DangerLevel::Dangerous);
}

#[test]
fn test_high_total_is_severe() {
    let when = ts(2024, 6, 15, 17, 30);
    let records: Vec<AccidentRecord> = (0..11)
        .map(|i| AccidentRecord::new(i, 44.8125 + i as f64 * 0.001, 20.4612, when))
        .collect();
    let index = RiskIndex::build(records).unwrap();

    let result = index.assess(44.8125, 20.4612, when).unwrap();
    assert_eq!(result.total, 11);
    assert_eq!(result.level, DangerLevel::Severe);
}

#[test]
fn test_temporal_clustering_is_severe_before_count_threshold() {
    // Five records, all at the query's time of day and season: the severe
    // branch (time >= 3 and season >= 5) fires before the count-only one.
    let when = ts(2024, 6, 15, 17, 30);
    let records: Vec<AccidentRecord> = (0..5)
        .map(|i| AccidentRecord::new(i, 44.8125 + i as f64 * 0.001, 20.4612, when))
        .collect();
    let index = RiskIndex::build(records).unwrap();

    let result = index.assess(44.8125, 20.4612, when).unwrap();
    assert_eq!(result.total, 5);
    assert_eq!(result.time_matched, 5);
    assert_eq!(result.season_matched, 5);
    assert_eq!(result.level, DangerLevel::Severe);
}

#[test]
fn test_empty_index_assesses_safe() {
    let index = RiskIndex::build(Vec::new()).unwrap();
    let result = index.assess(44.8125, 20.4612, ts(2024, 6, 15, 12, 0)).unwrap();

    assert_eq!(result.total, 0);
    assert_eq!(result.time_matched, 0);
    assert_eq!(result.season_matched, 0);
    assert_eq!(result.level, DangerLevel::Safe);
    assert!(result.details.is_empty());
}

#[test]
fn test_time_of_day_wraps_past_midnight() {
    // Accidents just before midnight must match a query just after it.
    let index = RiskIndex::build(vec![
        AccidentRecord::new(1, 44.8130, 20.4620, ts(2023, 6, 10, 23, 50)),
        AccidentRecord::new(2, 44.8140, 20.4605, ts(2023, 6, 10, 23, 55)),
    ])
    .unwrap();

    let after_midnight = index.assess(44.8125, 20.4612, ts(2024, 6, 12, 0, 5)).unwrap();
    assert_eq!(after_midnight.time_matched, 2);

    let at_noon = index.assess(44.8125, 20.4612, ts(2024, 6, 12, 12, 0)).unwrap();
    assert_eq!(at_noon.time_matched, 0);
    assert_eq!(at_noon.total, 2);
}

#[test]
fn test_seasonal_window_wraps_across_new_year() {
    // A late-December accident is in season for an early-January query.
    let index =
        RiskIndex::build(vec![AccidentRecord::new(1, 44.8130, 20.4620, ts(2023, 12, 28, 12, 0))])
            .unwrap();

    let january = index.assess(44.8125, 20.4612, ts(2024, 1, 5, 12, 0)).unwrap();
    assert_eq!(january.season_matched, 1);

    let july = index.assess(44.8125, 20.4612, ts(2024, 7, 5, 12, 0)).unwrap();
    assert_eq!(july.season_matched, 0);
}

#[test]
fn test_leap_day_record_matches_non_leap_query() {
    // Feb 29 record, Mar 1 query in a non-leap year: the day difference stays
    // within two days regardless of the year-length correction.
    let index =
        RiskIndex::build(vec![AccidentRecord::new(1, 44.8130, 20.4620, ts(2024, 2, 29, 12, 0))])
            .unwrap();

    let result = index.assess(44.8125, 20.4612, ts(2023, 3, 1, 12, 0)).unwrap();
    assert_eq!(result.season_matched, 1);
}

#[test]
fn test_assess_radius_monotonicity() {
    let when = ts(2024, 6, 15, 17, 30);
    let index = RiskIndex::build(vec![
        AccidentRecord::new(1, 44.8130, 20.4620, when),
        AccidentRecord::new(2, 44.8300, 20.4800, when),
        AccidentRecord::new(3, 44.9000, 20.5500, when),
        AccidentRecord::new(4, 45.2671, 19.8335, when),
    ])
    .unwrap();

    let mut previous = 0;
    for radius in [0.5, 3.0, 10.0, 30.0, 100.0] {
        let opts = AssessOptions::new().with_radius_km(radius);
        let result = index.assess_with(44.8125, 20.4612, when, &opts).unwrap();
        assert!(
            result.total >= previous,
            "total shrank when radius grew to {radius}"
        );
        previous = result.total;
    }
}

#[test]
fn test_record_found_at_its_own_coordinates() {
    let when = ts(2024, 6, 15, 17, 30);
    let records: Vec<AccidentRecord> = vec![
        AccidentRecord::new(1, 44.8125, 20.4612, when),
        AccidentRecord::new(2, 45.2671, 19.8335, when),
    ];
    let index = RiskIndex::build(records.clone()).unwrap();

    for record in &records {
        let opts = AssessOptions::new().with_radius_km(0.001).with_details();
        let result = index
            .assess_with(record.lat(), record.lon(), when, &opts)
            .unwrap();
        assert!(
            result.details.iter().any(|d| d.id == record.id),
            "record {} not found at its own coordinates",
            record.id
        );
    }
}

#[test]
fn test_route_assessment_covers_the_corridor() {
    let when = ts(2024, 6, 15, 17, 30);
    // One accident near the middle of a Belgrade -> Novi Sad route.
    let index =
        RiskIndex::build(vec![AccidentRecord::new(1, 45.0470, 20.1000, when)]).unwrap();

    let route = vec![
        (44.8125, 20.4612),
        (45.0471, 20.1001),
        (45.2671, 19.8335),
    ];

    let with_route = AssessOptions::new().with_route(route).with_radius_km(2.0);
    let result = index.assess_with(44.8125, 20.4612, when, &with_route).unwrap();
    assert_eq!(result.total, 1);

    // The same query anchored only at the start point sees nothing.
    let point_only = AssessOptions::new().with_radius_km(2.0);
    let result = index.assess_with(44.8125, 20.4612, when, &point_only).unwrap();
    assert_eq!(result.total, 0);
}

#[test]
fn test_malformed_records_are_skipped_not_fatal() {
    let when = ts(2024, 6, 15, 17, 30);
    let index = RiskIndex::build(vec![
        AccidentRecord::new(1, 44.8130, 20.4620, when),
        AccidentRecord::new(2, 95.0, 20.4620, when),
        AccidentRecord::new(3, f64::NAN, 20.4620, when),
        AccidentRecord::new(4, 44.8140, 20.4605, when),
    ])
    .unwrap();

    assert_eq!(index.stats().records, 2);
    assert_eq!(index.stats().skipped, 2);

    let result = index.assess(44.8125, 20.4612, when).unwrap();
    assert_eq!(result.total, 2);
}

#[test]
fn test_invalid_radius_is_surfaced_not_clamped() {
    let when = ts(2024, 6, 15, 17, 30);
    let index = RiskIndex::build(vec![AccidentRecord::new(1, 44.8130, 20.4620, when)]).unwrap();

    for radius in [0.0, -5.0, f64::NAN] {
        let opts = AssessOptions::new().with_radius_km(radius);
        assert!(matches!(
            index.assess_with(44.8125, 20.4612, when, &opts),
            Err(RiskError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_details_report_distance_and_offsets() {
    let index = RiskIndex::build(vec![AccidentRecord::new(
        1,
        44.8130,
        20.4620,
        ts(2024, 6, 10, 16, 30),
    )])
    .unwrap();

    let opts = AssessOptions::new().with_details();
    let result = index
        .assess_with(44.8125, 20.4612, ts(2024, 6, 15, 17, 30), &opts)
        .unwrap();

    assert_eq!(result.details.len(), 1);
    let detail = &result.details[0];
    assert_eq!(detail.id, 1);
    assert!(detail.distance_km < 0.2);
    assert_eq!(detail.days_from_seasonal_center, 5);
    // Five days and one hour earlier.
    assert!((detail.hours_from_now - 121.0).abs() < 1e-9);
}

#[test]
fn test_custom_config_windows() {
    // A 15-minute window no longer matches an accident 40 minutes away.
    let config = Config::default().with_time_window_secs(900);
    let index = RiskIndex::build_with_config(
        vec![AccidentRecord::new(1, 44.8130, 20.4620, ts(2023, 6, 10, 17, 50))],
        config,
    )
    .unwrap();

    let result = index.assess(44.8125, 20.4612, ts(2024, 6, 15, 17, 10)).unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.time_matched, 0);
}

#[test]
fn test_index_is_shareable_across_reader_threads() {
    let when = ts(2024, 6, 15, 17, 30);
    let records: Vec<AccidentRecord> = (0..100)
        .map(|i| AccidentRecord::new(i, 44.8 + (i % 10) as f64 * 0.002, 20.46, when))
        .collect();
    let index = RiskIndex::build(records).unwrap();

    // Frozen after build: concurrent readers need no locking.
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let result = index.assess(44.81, 20.46, when).unwrap();
                    assert!(result.total > 0);
                }
            });
        }
    });
}
