//! Role and ownership authorization.
//!
//! Every mutating operation runs `authorize` (role membership) and then
//! `authorize_ownership` (strict identity equality against the resource's
//! ownership reference) before any domain check.

use crate::domain::models::{
    auth::Identity,
    booking::Booking,
    package::Package,
    portfolio::Portfolio,
    user::Role,
};
use crate::error::AppError;
use tracing::warn;

pub const CUSTOMERS: &[Role] = &[Role::User];
pub const PHOTOGRAPHERS: &[Role] = &[Role::Photographer];
pub const ADMINS: &[Role] = &[Role::Admin];
pub const PHOTOGRAPHERS_AND_ADMINS: &[Role] = &[Role::Photographer, Role::Admin];

/// A resource whose mutations are reserved to the principal it references.
pub trait Owned {
    fn owner_ref(&self) -> &str;
}

impl Owned for Package {
    fn owner_ref(&self) -> &str {
        &self.photographer_id
    }
}

impl Owned for Portfolio {
    fn owner_ref(&self) -> &str {
        &self.photographer_id
    }
}

/// A booking is owned by the customer who made it.
impl Owned for Booking {
    fn owner_ref(&self) -> &str {
        &self.user_id
    }
}

/// Views a booking through the photographer it is assigned to.
pub struct AssignedPhotographer<'a>(pub &'a Booking);

impl Owned for AssignedPhotographer<'_> {
    fn owner_ref(&self) -> &str {
        &self.0.photographer_id
    }
}

pub fn is_owner<T: Owned + ?Sized>(identity: &Identity, entity: &T) -> bool {
    identity.subject == entity.owner_ref()
}

pub fn authorize(identity: &Identity, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&identity.role) {
        return Ok(());
    }
    warn!(user_id = %identity.subject, role = %identity.role, "Role not permitted for this route");
    Err(AppError::Forbidden(format!(
        "User role {} is not authorized to access this route",
        identity.role
    )))
}

pub fn authorize_ownership<T: Owned + ?Sized>(identity: &Identity, entity: &T, action: &str) -> Result<(), AppError> {
    if is_owner(identity, entity) {
        return Ok(());
    }
    warn!(user_id = %identity.subject, "Ownership check failed: {}", action);
    Err(AppError::Forbidden(format!("Not authorized to {}", action)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::NewBookingParams;
    use crate::domain::models::package::NewPackageParams;
    use chrono::Utc;

    fn identity(subject: &str, role: Role) -> Identity {
        Identity { subject: subject.to_string(), role }
    }

    fn package_of(owner: &str) -> Package {
        Package::new(NewPackageParams {
            photographer_id: owner.to_string(),
            name: "Mini session".into(),
            description: "30 minutes outdoors".into(),
            price: 120.0,
            duration: "30 minutes".into(),
            includes: vec!["10 edited photos".into()],
            is_active: true,
        })
    }

    #[test]
    fn role_outside_allowed_set_is_forbidden() {
        let sam = identity("sam", Role::User);
        let admin = identity("root", Role::Admin);

        assert!(authorize(&sam, CUSTOMERS).is_ok());
        assert!(matches!(authorize(&sam, PHOTOGRAPHERS), Err(AppError::Forbidden(_))));
        assert!(matches!(authorize(&sam, PHOTOGRAPHERS_AND_ADMINS), Err(AppError::Forbidden(_))));
        assert!(authorize(&admin, PHOTOGRAPHERS_AND_ADMINS).is_ok());
        // admins are not implicitly members of every role set
        assert!(matches!(authorize(&admin, CUSTOMERS), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn ownership_is_strict_identity_equality() {
        let package = package_of("jane");

        assert!(is_owner(&identity("jane", Role::Photographer), &package));
        assert!(!is_owner(&identity("bob", Role::Photographer), &package));
        // role alone never grants ownership
        assert!(!is_owner(&identity("root", Role::Admin), &package));
        assert!(matches!(
            authorize_ownership(&identity("bob", Role::Photographer), &package, "update this package"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn bookings_have_two_ownership_views() {
        let booking = Booking::new(NewBookingParams {
            user_id: "sam".into(),
            photographer_id: "jane".into(),
            package_id: "pk".into(),
            date: Utc::now(),
            location: None,
            notes: None,
        });

        let sam = identity("sam", Role::User);
        let jane = identity("jane", Role::Photographer);

        assert!(is_owner(&sam, &booking));
        assert!(!is_owner(&jane, &booking));
        assert!(is_owner(&jane, &AssignedPhotographer(&booking)));
        assert!(!is_owner(&sam, &AssignedPhotographer(&booking)));
    }
}
