// service/quota.rs
//
// The quota ledger. A user's `listing_limit` is a ceiling checked against
// the current listing count, not a decremented counter; only order
// confirmation mutates it. The decision itself is pure so callers can
// evaluate it inside whatever transaction scope they hold.

use chrono::{DateTime, Duration, Utc};

use crate::{
    models::ordermodel::{ListingPackage, PackageType},
    service::error::ServiceError,
};

/// Default ceiling for accounts that never bought a package.
pub const DEFAULT_LISTING_LIMIT: i32 = 1;

/// Advisory check run before a listing insert. Expiry dominates quota: an
/// expired package blocks posting regardless of remaining allowance.
pub fn quota_decision(
    listing_limit: i32,
    package_expiry: Option<DateTime<Utc>>,
    active_count: i64,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    if let Some(expiry) = package_expiry {
        if expiry < now {
            return Err(ServiceError::PackageExpired(expiry));
        }
    }

    if active_count >= listing_limit as i64 {
        return Err(ServiceError::QuotaExceeded {
            used: active_count,
            limit: listing_limit,
        });
    }

    Ok(())
}

/// The new (limit, expiry) after a confirmed package purchase.
///
/// Limits are additive. Subscription packages extend the expiry from
/// whichever is later, now or the current expiry; top-ups leave the expiry
/// untouched.
pub fn credit_package(
    listing_limit: i32,
    package_expiry: Option<DateTime<Utc>>,
    package: &ListingPackage,
    now: DateTime<Utc>,
) -> (i32, Option<DateTime<Utc>>) {
    let new_limit = listing_limit + package.listing_limit;

    let new_expiry = match package.package_type {
        PackageType::Subscription => {
            let base = match package_expiry {
                Some(current) if current > now => current,
                _ => now,
            };
            Some(base + Duration::days(package.duration_days as i64))
        }
        PackageType::Topup => package_expiry,
    };

    (new_limit, new_expiry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn package(package_type: PackageType, listing_limit: i32, duration_days: i32) -> ListingPackage {
        ListingPackage {
            id: Uuid::new_v4(),
            name: "Starter".to_string(),
            price: 500_000,
            listing_limit,
            duration_days,
            package_type,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_quota_is_a_ceiling() {
        let now = Utc::now();
        assert!(quota_decision(1, None, 0, now).is_ok());
        // count == limit exhausts the quota
        assert!(matches!(
            quota_decision(1, None, 1, now),
            Err(ServiceError::QuotaExceeded { used: 1, limit: 1 })
        ));
        // raising the limit frees a slot immediately
        assert!(quota_decision(2, None, 1, now).is_ok());
    }

    #[test]
    fn test_expired_package_blocks_regardless_of_quota() {
        let now = Utc::now();
        let expired = now - Duration::days(1);
        assert!(matches!(
            quota_decision(10, Some(expired), 0, now),
            Err(ServiceError::PackageExpired(_))
        ));
    }

    #[test]
    fn test_future_expiry_allows_posting() {
        let now = Utc::now();
        let valid = now + Duration::days(30);
        assert!(quota_decision(2, Some(valid), 1, now).is_ok());
    }

    #[test]
    fn test_subscription_credit_extends_from_current_expiry() {
        let now = Utc::now();
        let current = now + Duration::days(10);
        let pkg = package(PackageType::Subscription, 5, 30);

        let (limit, expiry) = credit_package(1, Some(current), &pkg, now);
        assert_eq!(limit, 6);
        assert_eq!(expiry, Some(current + Duration::days(30)));
    }

    #[test]
    fn test_subscription_credit_restarts_from_now_when_lapsed() {
        let now = Utc::now();
        let lapsed = now - Duration::days(5);
        let pkg = package(PackageType::Subscription, 5, 30);

        let (limit, expiry) = credit_package(1, Some(lapsed), &pkg, now);
        assert_eq!(limit, 6);
        assert_eq!(expiry, Some(now + Duration::days(30)));
    }

    #[test]
    fn test_topup_credit_leaves_expiry_untouched() {
        let now = Utc::now();
        let current = now + Duration::days(10);
        let pkg = package(PackageType::Topup, 5, 0);

        let (limit, expiry) = credit_package(3, Some(current), &pkg, now);
        assert_eq!(limit, 8);
        assert_eq!(expiry, Some(current));

        let (limit, expiry) = credit_package(3, None, &pkg, now);
        assert_eq!(limit, 8);
        assert_eq!(expiry, None);
    }
}
