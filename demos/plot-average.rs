use chrono::NaiveDate;
use meteo_lows::{
    profile::{slot_date, DAYS_IN_YEAR},
    Curve, SeasonalProfile,
};
use plotters::{coord::combinators::BindKeyPoints, prelude::*};
use tracing_subscriber::EnvFilter;

const PLOT_FILE: &str = "weather.png";
// 16 by 8 inches at 96 dpi
const PLOT_SIZE: (u32, u32) = (16 * 96, 8 * 96);

fn to_chrono(date: time::Date) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month() as u32, date.day() as u32)
        .unwrap_or_else(|| panic!("chrono can't represent {date}"))
}

fn slot_to_chrono(slot: usize) -> NaiveDate {
    to_chrono(slot_date(slot).unwrap())
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let years = meteo_lows::load_years(std::env::args().skip(1))?;
    let profile = SeasonalProfile::from_years(&years);
    let summary = profile.summary()?;

    let first_day = slot_to_chrono(0);
    let last_day = slot_to_chrono(DAYS_IN_YEAR - 1);

    let ticks = summary.temperature_ticks();
    let caption = format!(
        "Seasonal temperature, {:.1} to {:.1}",
        summary.min_temp, summary.max_temp
    );

    let root = BitMapBackend::new(PLOT_FILE, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).unwrap();
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 50).into_font())
        .margin(5)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(
            first_day..last_day,
            (summary.min_temp..summary.max_temp).with_key_points(ticks),
        )
        .unwrap();

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|date| date.format("%B").to_string())
        // Extremes keep a decimal, the round ticks don't need one.
        .y_label_formatter(&|value| {
            if *value == summary.min_temp || *value == summary.max_temp {
                format!("{value:.1}")
            } else {
                format!("{value:.0}")
            }
        })
        .y_desc("Temperature (Celsius)")
        .draw()
        .unwrap();

    for (curve, color) in [(Curve::High, RED), (Curve::Low, BLUE)] {
        chart
            .draw_series(LineSeries::new(
                profile
                    .points()
                    .map(|point| (slot_to_chrono(point.day_of_year), point.get(curve))),
                color,
            ))
            .unwrap()
            .label(curve.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .draw_series(LineSeries::new(
            [(first_day, summary.threshold), (last_day, summary.threshold)],
            BLACK,
        ))
        .unwrap()
        .label(summary.threshold.to_string())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    for (curve, run, color) in [
        (Curve::High, summary.best_high, MAGENTA),
        (Curve::Low, summary.best_low, GREEN),
    ] {
        let start = run.start_date().unwrap();
        let x = to_chrono(start);
        chart
            .draw_series(LineSeries::new(
                [(x, summary.min_temp), (x, summary.max_temp)],
                color,
            ))
            .unwrap()
            .label(format!(
                "{curve} consistently above {} after {} {}",
                summary.threshold,
                start.month(),
                start.day()
            ))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .unwrap();

    root.present().unwrap();
    println!("Wrote {PLOT_FILE}");

    Ok(())
}
