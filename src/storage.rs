use crate::models::BookingData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("BOOKINGS_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/bookings.json")
}

/// Reads the booking dataset. Any failure leaves the dashboard empty rather
/// than refusing to start.
pub async fn load_data(path: &Path) -> BookingData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse bookings file {}: {err}", path.display());
                BookingData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("bookings file {} not found, starting empty", path.display());
            BookingData::default()
        }
        Err(err) => {
            error!("failed to read bookings file {}: {err}", path.display());
            BookingData::default()
        }
    }
}
