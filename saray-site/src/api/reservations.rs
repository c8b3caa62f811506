//! Reservation requests from the public site
//!
//! A request is stored as a `pending` reservation. Staff see it in the
//! admin panel's reservations tab.

use axum::extract::{State, rejection::JsonRejection};
use axum::{Json, http::StatusCode};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use shared::models::{Reservation, ReservationInput, ReservationStatus};
use shared::{ApiResponse, AppError, AppResult, ErrorCode, Record, RecordInput, ResourceKind};

use crate::state::AppState;
use crate::validation::{self, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN};

/// Largest party the booking form accepts
pub const MAX_GUESTS: i32 = 20;

pub const RECEIVED: &str = "Rezervasyonunuz alındı! En kısa sürede size dönüş yapılacaktır.";

/// Party size as posted; the booking form keeps it as text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GuestCount {
    Number(i64),
    Text(String),
}

impl GuestCount {
    fn parse(&self) -> AppResult<i64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) if text.trim().is_empty() => Err(AppError::required("guests")),
            Self::Text(text) => text.trim().parse().map_err(|_| {
                AppError::with_message(ErrorCode::InvalidFormat, "guests must be a whole number")
                    .with_detail("field", "guests")
            }),
        }
    }
}

/// Booking form as posted by the site
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReservationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub guests: Option<GuestCount>,
}

impl ReservationRequest {
    /// Check every field and build the insert payload
    pub fn validate(&self, today: NaiveDate) -> AppResult<ReservationInput> {
        let customer_name = validation::required_text(&self.name, "name", MAX_NAME_LEN)?;
        let customer_email = validation::email(&self.email, "email")?;
        let customer_phone = validation::required_text(&self.phone, "phone", MAX_SHORT_TEXT_LEN)?;

        let date = validation::required_text(&self.date, "date", MAX_SHORT_TEXT_LEN)?;
        let reservation_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
            AppError::with_message(ErrorCode::InvalidFormat, "date must be YYYY-MM-DD")
                .with_detail("field", "date")
        })?;
        if reservation_date < today {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "date is in the past",
            )
            .with_detail("field", "date"));
        }

        let time = validation::required_text(&self.time, "time", MAX_SHORT_TEXT_LEN)?;
        let reservation_time = NaiveTime::parse_from_str(&time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&time, "%H:%M:%S"))
            .map_err(|_| {
                AppError::with_message(ErrorCode::InvalidFormat, "time must be HH:MM")
                    .with_detail("field", "time")
            })?;

        let guests = self
            .guests
            .as_ref()
            .ok_or_else(|| AppError::required("guests"))?
            .parse()?;
        let guest_count = i32::try_from(guests)
            .ok()
            .filter(|n| (1..=MAX_GUESTS).contains(n))
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::GuestCountOutOfRange,
                    format!("guests must be between 1 and {MAX_GUESTS}"),
                )
                .with_detail("field", "guests")
            })?;

        Ok(ReservationInput {
            customer_name,
            customer_email,
            customer_phone,
            reservation_date,
            reservation_time,
            guest_count,
            status: ReservationStatus::Pending,
        })
    }
}

/// POST /api/reservations - take a booking request
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Reservation>>)> {
    let Json(payload) = payload?;
    let input = payload.validate(chrono::Local::now().date_naive())?;
    let record = state
        .client
        .insert(ResourceKind::Reservations, &RecordInput::Reservation(input))
        .await?;
    let Record::Reservation(reservation) = record else {
        return Err(AppError::internal("insert returned a different record kind"));
    };

    tracing::info!(
        id = %reservation.id,
        date = %reservation.reservation_date,
        guests = reservation.guest_count,
        "Reservation request stored"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(RECEIVED, reservation)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReservationRequest {
        ReservationRequest {
            name: "Ayşe Yılmaz".into(),
            email: "ayse@example.com".into(),
            phone: "+90 555 000 00 00".into(),
            date: "2026-10-24".into(),
            time: "19:00".into(),
            guests: Some(GuestCount::Number(4)),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_valid_request_is_pending() {
        let input = request().validate(today()).unwrap();
        assert_eq!(input.status, ReservationStatus::Pending);
        assert_eq!(input.guest_count, 4);
        assert_eq!(input.reservation_time, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
    }

    #[test]
    fn test_guest_bounds() {
        let mut req = request();
        req.guests = Some(GuestCount::Number(0));
        assert_eq!(
            req.validate(today()).unwrap_err().code,
            ErrorCode::GuestCountOutOfRange
        );
        req.guests = Some(GuestCount::Number(i64::from(MAX_GUESTS) + 1));
        assert!(req.validate(today()).is_err());
        req.guests = Some(GuestCount::Number(i64::from(i32::MAX) + 1));
        assert_eq!(
            req.validate(today()).unwrap_err().code,
            ErrorCode::GuestCountOutOfRange
        );
        req.guests = None;
        assert_eq!(req.validate(today()).unwrap_err().code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_guests_posted_as_text() {
        let req: ReservationRequest = serde_json::from_value(serde_json::json!({
            "name": "Ayşe Yılmaz",
            "email": "ayse@example.com",
            "phone": "+90 555 000 00 00",
            "date": "2026-10-24",
            "time": "19:00",
            "guests": " 2 "
        }))
        .unwrap();
        assert_eq!(req.validate(today()).unwrap().guest_count, 2);

        let mut req = request();
        req.guests = Some(GuestCount::Text("iki".into()));
        assert_eq!(req.validate(today()).unwrap_err().code, ErrorCode::InvalidFormat);
        req.guests = Some(GuestCount::Text("  ".into()));
        assert_eq!(req.validate(today()).unwrap_err().code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_date_and_time_formats() {
        let mut req = request();
        req.date = "24.10.2026".into();
        assert_eq!(req.validate(today()).unwrap_err().code, ErrorCode::InvalidFormat);

        let mut req = request();
        req.date = "2026-10-18".into();
        assert_eq!(req.validate(today()).unwrap_err().code, ErrorCode::ValueOutOfRange);

        let mut req = request();
        req.time = "akşam".into();
        assert_eq!(req.validate(today()).unwrap_err().code, ErrorCode::InvalidFormat);
    }
}
