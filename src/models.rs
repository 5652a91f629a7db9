use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    #[serde(deserialize_with = "deserialize_pickup_date")]
    pub pickup_date: NaiveDateTime,
    pub pickup_address: String,
    pub drop_address: String,
    // The upstream dataset spells this key `taxi_amout`.
    #[serde(alias = "taxi_amout")]
    pub taxi_amount: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BookingData {
    #[serde(rename = "BOOKDATA", default)]
    pub bookings: Vec<Booking>,
}

/// Parses a pickup timestamp as it appears in the dataset.
///
/// Offset-carrying RFC 3339 values are converted to local time; naive values
/// are taken as local already. A bare date means midnight.
pub fn parse_pickup_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn deserialize_pickup_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_pickup_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid pickup_date: {raw}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Weekly,
    Monthly,
}

impl Timeframe {
    pub const DEFAULT: Timeframe = Timeframe::Monthly;

    /// Returns `None` for tags that name no known window.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Rides,
    Highest,
    Lowest,
    Average,
}

impl Metric {
    pub const DEFAULT: Metric = Metric::Rides;

    /// Unknown tags fall back to [`Metric::Rides`].
    pub fn parse_or_default(tag: &str) -> Self {
        match tag {
            "rides" => Self::Rides,
            "highest" => Self::Highest,
            "lowest" => Self::Lowest,
            "average" => Self::Average,
            _ => Self::DEFAULT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rides => "rides",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
            Self::Average => "average",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rides => "Number of Rides",
            Self::Highest => "Highest Taxi Price",
            Self::Lowest => "Lowest Taxi Price",
            Self::Average => "Average Taxi Price",
        }
    }

    pub fn title(self) -> String {
        format!("{} Per Day", self.label())
    }

    /// Bar colour as `(background, border)`.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Self::Rides => ("rgba(75, 192, 192, 0.6)", "rgba(75, 192, 192, 1)"),
            Self::Highest => ("rgba(255, 99, 132, 0.6)", "rgba(255, 99, 132, 1)"),
            Self::Lowest => ("rgba(54, 162, 235, 0.6)", "rgba(54, 162, 235, 1)"),
            Self::Average => ("rgba(255, 206, 86, 0.6)", "rgba(255, 206, 86, 1)"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AveragesQuery {
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub graph_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteAverage {
    pub route: String,
    pub average: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub title: String,
    #[serde(flatten)]
    pub chart: ChartData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub bookings: usize,
}
