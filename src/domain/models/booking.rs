use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::domain::models::user::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// No transition is defined out of a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// pending -> confirmed -> completed, pending | confirmed -> cancelled.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (*self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(UnknownVariant { kind: "booking status", value: other.to_string() }),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    #[serde(rename = "photographer")]
    pub photographer_id: String,
    #[serde(rename = "package")]
    pub package_id: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub user_id: String,
    pub photographer_id: String,
    pub package_id: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            photographer_id: params.photographer_id,
            package_id: params.package_id,
            date: params.date,
            location: params.location,
            notes: params.notes,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Which bookings a listing is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingScope {
    Customer(String),
    Photographer(String),
    All,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PartyRef {
    pub id: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct PackageRef {
    pub id: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
}

/// A booking with its references replaced by minimal projections of the counterpart entities.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: String,
    pub user: PartyRef,
    pub photographer: PartyRef,
    pub package: PackageRef,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct BookingViewRow {
    pub id: String,
    pub user_id: String,
    pub user_name: Option<String>,
    pub photographer_id: String,
    pub photographer_name: Option<String>,
    pub package_id: String,
    pub package_name: Option<String>,
    pub package_price: Option<f64>,
    pub package_duration: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<BookingViewRow> for BookingView {
    fn from(row: BookingViewRow) -> Self {
        Self {
            id: row.id,
            user: PartyRef { id: row.user_id, full_name: row.user_name },
            photographer: PartyRef { id: row.photographer_id, full_name: row.photographer_name },
            package: PackageRef {
                id: row.package_id,
                name: row.package_name,
                price: row.package_price,
                duration: row.package_duration,
            },
            date: row.date,
            location: row.location,
            notes: row.notes,
            status: row.status,
            created_at: row.created_at,
        }
    }
}
