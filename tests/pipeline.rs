use meteo_lows::{parse_year, Curve, SeasonalProfile, YearStatistics};

/// Four readings a day, in a different order every day.
fn year_month_day_export(year: i32, rotate: bool) -> (String, Vec<f64>) {
    let mut csv = String::from("year,month,day,hour,temperature\n");
    let mut readings = Vec::new();
    let days_in_month = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let mut n = 0;
    for (month, &days) in days_in_month.iter().enumerate() {
        for day in 1..=days {
            let mut hours = [0, 6, 12, 18];
            if rotate {
                hours.rotate_left(n % 4);
            }
            for hour in hours {
                let temperature = ((n * 37 + hour * 11) % 61) as f64 / 2.0 - 12.5;
                readings.push(temperature);
                csv.push_str(&format!(
                    "{year}, {}, {day},{hour}, {temperature}\n",
                    month + 1
                ));
            }
            n += 1;
        }
    }

    (csv, readings)
}

#[test]
fn intra_day_order_does_not_change_extremes() {
    let (sorted, readings) = year_month_day_export(2019, false);
    let (rotated, _) = year_month_day_export(2019, true);

    let sorted = parse_year("sorted.csv", &sorted).unwrap();
    let rotated = parse_year("rotated.csv", &rotated).unwrap();
    assert_eq!(sorted.days().len(), 365);
    assert_eq!(rotated.days().len(), 365);

    for (left, right) in sorted.days().iter().zip(rotated.days()) {
        assert_eq!(left, right);
    }

    let stats = YearStatistics::compute(&rotated);
    let low = readings.iter().copied().fold(f64::INFINITY, f64::min);
    let high = readings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(stats.year, 2019);
    assert_eq!(stats.yearly_low, low);
    assert_eq!(stats.yearly_high, high);
}

fn year_yearday_export(year: i32, high: impl Fn(usize) -> f64) -> String {
    let mut csv = String::from("Year,Day,Hour,Air Temperature\n");
    for day in 0..365 {
        let high = high(day);
        csv.push_str(&format!("{year},{day},3,{}\n", high - 8.0));
        csv.push_str(&format!("{year},{day},15,{high}\n"));
    }
    csv
}

#[test]
fn several_years() {
    // Cold until mid April, warm until the end of October, cold again.
    let shape = |day: usize| if (105..304).contains(&day) { 18.0 } else { 2.0 };
    let first = year_yearday_export(2018, shape);
    let second = year_yearday_export(2019, |day| shape(day) + 4.0);

    let first = parse_year("2018.csv", &first).unwrap();
    let second = parse_year("2019.csv", &second).unwrap();

    assert_eq!(
        YearStatistics::compute(&first).to_string(),
        "2018,-6.000000,18.000000,[2018-01-01]"
    );
    assert_eq!(
        YearStatistics::compute(&second).to_string(),
        "2019,-2.000000,22.000000,[2019-01-01]"
    );

    let profile = SeasonalProfile::from_years([&first, &second]);
    let point = profile.get(0).unwrap();
    assert_eq!(point.high, 4.0);
    assert_eq!(point.low, -4.0);

    let summary = profile.summary().unwrap();
    assert_eq!(summary.best_high.start, 105);
    assert_eq!(summary.best_high.length, 199);
    assert_eq!(summary.best_low.start, 105);
    assert_eq!(summary.min_temp, -4.0);
    assert_eq!(summary.max_temp, 20.0);
    assert_eq!(profile.runs(Curve::Low).len(), 1);
}
