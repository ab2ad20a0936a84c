use std::sync::Arc;
use chrono::{DateTime, Utc};
use crate::domain::models::{
    auth::Identity,
    booking::{Booking, BookingScope, BookingStatus, BookingView, NewBookingParams},
    user::Role,
};
use crate::domain::ports::{BookingRepository, PackageRepository, UserRepository};
use crate::domain::services::guard::{self, AssignedPhotographer};
use crate::error::AppError;
use tracing::{info, warn};

pub struct NewBooking {
    pub photographer_id: String,
    pub package_id: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Booking lifecycle: creation, status updates, cancellation and scoped listings.
///
/// Each operation authorizes the role first, then ownership, then applies the
/// lifecycle rule, and only then persists.
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    packages: Arc<dyn PackageRepository>,
    strict_transitions: bool,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        packages: Arc<dyn PackageRepository>,
        strict_transitions: bool,
    ) -> Self {
        Self { bookings, users, packages, strict_transitions }
    }

    pub async fn create(&self, identity: &Identity, request: NewBooking) -> Result<Booking, AppError> {
        guard::authorize(identity, guard::CUSTOMERS)?;

        let photographer = self.users.find_by_id(&request.photographer_id).await?;
        if !photographer.is_some_and(|p| p.role == Role::Photographer) {
            return Err(AppError::Validation("Selected photographer not found".into()));
        }

        if self.packages.find_by_id(&request.package_id).await?.is_none() {
            return Err(AppError::Validation("Selected package not found".into()));
        }

        let booking = Booking::new(NewBookingParams {
            user_id: identity.subject.clone(),
            photographer_id: request.photographer_id,
            package_id: request.package_id,
            date: request.date,
            location: request.location,
            notes: request.notes,
        });

        let created = self.bookings.create(&booking).await?;
        info!(user_id = %created.user_id, photographer_id = %created.photographer_id, "Booking created: {}", created.id);
        Ok(created)
    }

    /// Photographers may only touch bookings assigned to them; admins bypass ownership.
    pub async fn update_status(&self, identity: &Identity, booking_id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS_AND_ADMINS)?;

        let booking = self.find(booking_id).await?;

        if identity.role == Role::Photographer {
            guard::authorize_ownership(identity, &AssignedPhotographer(&booking), "update this booking")?;
        }

        let updated = if self.strict_transitions {
            if !booking.status.can_transition_to(status) {
                warn!("Rejected booking transition {} -> {} for {}", booking.status, status, booking.id);
                return Err(illegal_transition(booking.status, status));
            }
            // The write only lands if nobody moved the booking since it was read.
            match self.bookings.transition_status(&booking.id, booking.status, status).await? {
                Some(updated) => updated,
                None => {
                    let current = self.find(booking_id).await?;
                    warn!("Booking {} moved to {} before {} could be applied", booking.id, current.status, status);
                    return Err(illegal_transition(current.status, status));
                }
            }
        } else {
            self.bookings.update_status(&booking.id, status).await?
        };
        info!(user_id = %identity.subject, "Booking {} status set to {}", updated.id, updated.status);
        Ok(updated)
    }

    /// Only the customer who made the booking may cancel it.
    pub async fn cancel(&self, identity: &Identity, booking_id: &str) -> Result<Booking, AppError> {
        guard::authorize(identity, guard::CUSTOMERS)?;

        let booking = self.find(booking_id).await?;
        guard::authorize_ownership(identity, &booking, "cancel this booking")?;

        if booking.status.is_terminal() {
            return Err(cannot_cancel(booking.status));
        }

        // A concurrent cancel/complete may land between the read and the write.
        match self.bookings.cancel_if_open(&booking.id).await? {
            Some(cancelled) => {
                info!(user_id = %identity.subject, "Booking cancelled: {}", cancelled.id);
                Ok(cancelled)
            }
            None => {
                let current = self.find(booking_id).await?;
                Err(cannot_cancel(current.status))
            }
        }
    }

    pub async fn list_for_customer(&self, identity: &Identity) -> Result<Vec<BookingView>, AppError> {
        guard::authorize(identity, guard::CUSTOMERS)?;
        self.bookings.list_views(&BookingScope::Customer(identity.subject.clone())).await
    }

    pub async fn list_for_photographer(&self, identity: &Identity) -> Result<Vec<BookingView>, AppError> {
        guard::authorize(identity, guard::PHOTOGRAPHERS)?;
        self.bookings.list_views(&BookingScope::Photographer(identity.subject.clone())).await
    }

    pub async fn list_all(&self, identity: &Identity) -> Result<Vec<BookingView>, AppError> {
        guard::authorize(identity, guard::ADMINS)?;
        self.bookings.list_views(&BookingScope::All).await
    }

    async fn find(&self, booking_id: &str) -> Result<Booking, AppError> {
        self.bookings.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }
}

fn illegal_transition(from: BookingStatus, to: BookingStatus) -> AppError {
    AppError::InvalidState(format!("Cannot change booking status from {} to {}", from, to))
}

fn cannot_cancel(status: BookingStatus) -> AppError {
    AppError::InvalidState(format!("Cannot cancel a booking with status: {}", status))
}
