//! Reservation Model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation status (rezervasyon durumu)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Label shown in the admin panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Beklemede",
            Self::Confirmed => "Onaylandı",
            Self::Completed => "Tamamlandı",
            Self::Cancelled => "İptal Edildi",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation entity (rezervasyon)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub guest_count: i32,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a reservation coming from the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationInput {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub guest_count: i32,
    pub status: ReservationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_postgrest_row() {
        let json = r#"{
            "id": "r1",
            "customer_name": "Ayşe Yılmaz",
            "customer_email": "ayse@example.com",
            "customer_phone": "+90 555 000 00 00",
            "reservation_date": "2026-10-24",
            "reservation_time": "19:30:00",
            "guest_count": 4,
            "status": "confirmed",
            "created_at": "2026-10-18T09:00:00Z"
        }"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.status.label(), "Onaylandı");
        assert_eq!(
            reservation.reservation_time,
            NaiveTime::from_hms_opt(19, 30, 0).unwrap()
        );
        assert!(reservation.created_at.is_some());
    }
}
