use crate::domain::{
    models::booking::{Booking, BookingScope, BookingStatus, BookingView, BookingViewRow},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

const VIEW_SELECT: &str = "SELECT b.id, b.user_id, u.full_name AS user_name, b.photographer_id, p.full_name AS photographer_name, \
    b.package_id, k.name AS package_name, k.price AS package_price, k.duration AS package_duration, \
    b.date, b.location, b.notes, b.status, b.created_at \
    FROM bookings b \
    LEFT JOIN users u ON u.id = b.user_id \
    LEFT JOIN users p ON p.id = b.photographer_id \
    LEFT JOIN packages k ON k.id = b.package_id";

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, photographer_id, package_id, date, location, notes, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&booking.id)
            .bind(&booking.user_id)
            .bind(&booking.photographer_id)
            .bind(&booking.package_id)
            .bind(booking.date)
            .bind(&booking.location)
            .bind(&booking.notes)
            .bind(booking.status.as_str())
            .bind(booking.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite Booking Creation Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? RETURNING *")
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }

    async fn transition_status(&self, id: &str, expected: BookingStatus, status: BookingStatus) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? AND status = ? RETURNING *")
            .bind(status.as_str())
            .bind(id)
            .bind(expected.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn cancel_if_open(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled' WHERE id = ? AND status NOT IN ('cancelled', 'completed') RETURNING *",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_views(&self, scope: &BookingScope) -> Result<Vec<BookingView>, AppError> {
        let (filter, subject) = match scope {
            BookingScope::Customer(id) => ("WHERE b.user_id = ?", Some(id)),
            BookingScope::Photographer(id) => ("WHERE b.photographer_id = ?", Some(id)),
            BookingScope::All => ("", None),
        };
        let sql = format!("{} {} ORDER BY b.date DESC", VIEW_SELECT, filter);

        let mut query = sqlx::query_as::<_, BookingViewRow>(&sql);
        if let Some(subject) = subject {
            query = query.bind(subject);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(AppError::Database)?;
        Ok(rows.into_iter().map(BookingView::from).collect())
    }
}
