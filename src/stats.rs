use crate::models::{
    Booking, ChartData, ChartDataset, DailySeries, Metric, RouteAverage, Timeframe,
};
use chrono::{Duration, Local, Months, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

pub fn route_averages(bookings: &[Booking], timeframe: Timeframe) -> Vec<RouteAverage> {
    route_averages_at(Local::now().naive_local(), bookings, timeframe)
}

/// Average fare per route over bookings picked up after the start of the
/// timeframe window ending at `now`. Routes keep their first-seen order.
pub fn route_averages_at(
    now: NaiveDateTime,
    bookings: &[Booking],
    timeframe: Timeframe,
) -> Vec<RouteAverage> {
    let start = window_start(now, timeframe);
    let in_window = bookings.iter().filter(|booking| booking.pickup_date > start);

    group_by_route(in_window)
        .into_iter()
        .map(|(route, amounts)| RouteAverage {
            route,
            average: format_fare(mean(&amounts)),
        })
        .collect()
}

pub fn daily_series(bookings: &[Booking], metric: Metric) -> DailySeries {
    let mut days: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for booking in bookings {
        days.entry(date_key(booking.pickup_date))
            .or_default()
            .push(booking.taxi_amount);
    }

    let mut series = DailySeries {
        labels: Vec::with_capacity(days.len()),
        values: Vec::with_capacity(days.len()),
    };
    for (day, amounts) in days {
        series.values.push(metric_value(metric, &amounts));
        series.labels.push(day);
    }
    series
}

pub fn chart_data(bookings: &[Booking], metric: Metric) -> ChartData {
    let DailySeries { labels, values } = daily_series(bookings, metric);
    let (background_color, border_color) = metric.colors();

    ChartData {
        labels,
        datasets: vec![ChartDataset {
            label: metric.label().to_string(),
            data: values,
            background_color: background_color.to_string(),
            border_color: border_color.to_string(),
            border_width: 1,
        }],
    }
}

pub fn route_key(booking: &Booking) -> String {
    format!("{} → {}", booking.pickup_address, booking.drop_address)
}

fn group_by_route<'a>(bookings: impl Iterator<Item = &'a Booking>) -> Vec<(String, Vec<f64>)> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for booking in bookings {
        let slot = *slots.entry(route_key(booking)).or_insert_with_key(|route| {
            groups.push((route.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(booking.taxi_amount);
    }

    groups
}

// Monthly is a rolling calendar month: the day of month is clamped, so
// Mar 31 looks back to Feb 28/29 rather than a fixed 30 days.
fn window_start(now: NaiveDateTime, timeframe: Timeframe) -> NaiveDateTime {
    match timeframe {
        Timeframe::Weekly => now - Duration::weeks(1),
        Timeframe::Monthly => now
            .checked_sub_months(Months::new(1))
            .unwrap_or(NaiveDateTime::MIN),
    }
}

fn metric_value(metric: Metric, amounts: &[f64]) -> f64 {
    match metric {
        Metric::Rides => amounts.len() as f64,
        Metric::Highest => amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Metric::Lowest => amounts.iter().copied().fold(f64::INFINITY, f64::min),
        Metric::Average => mean(amounts),
    }
}

fn mean(amounts: &[f64]) -> f64 {
    amounts.iter().sum::<f64>() / amounts.len() as f64
}

/// Two-decimal fare text. Exact ties at the third decimal round away from
/// zero; everything else rounds to the nearest cent of the exact value.
fn format_fare(value: f64) -> String {
    // Only odd eighths (x.125, x.375, x.625, x.875) are exact ties.
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths.abs() < (1u64 << 48) as f64 && eighths % 2.0 != 0.0 {
        let cents = (value * 100.0).round();
        return format!("{:.2}", cents / 100.0);
    }
    format!("{:.2}", value)
}

fn date_key(date: NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}
