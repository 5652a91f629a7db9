use crate::models::{Booking, BookingData};
use std::sync::Arc;

/// The dataset is loaded once and only ever read, so handlers share it
/// without a lock.
#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<[Booking]>,
}

impl AppState {
    pub fn new(data: BookingData) -> Self {
        Self {
            bookings: data.bookings.into(),
        }
    }
}
