use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::domain::reservation::{
    CancellationReceipt, Reservation, ReservationId, REFUND_POLICY,
};
use crate::domain::restaurant::Restaurant;
use crate::errors::DomainError;

const FIRST_CONFIRMATION_NUMBER: u64 = 1000;

/// Guest-submitted booking details. `date_time` stays an opaque
/// string; with the guest email and the restaurant id it forms the
/// duplicate-submission key.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingRequest {
    pub date_time: String,
    pub party_size: i64,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub notes: Option<String>,
}

#[derive(Debug)]
struct LedgerState {
    next_confirmation: u64,
    active: HashMap<String, Reservation>,
    by_contact: HashMap<String, Vec<ReservationId>>,
}

///// In-memory store of active reservations: an arena keyed by
/// reservation id plus a contact index for guest lookups, both
/// guarded by one lock so the dedup check, the confirmation counter
/// and the two maps always move together.
#[derive(Debug)]
pub struct ReservationLedger {
    state: Mutex<LedgerState>,
}

impl ReservationLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                next_confirmation: FIRST_CONFIRMATION_NUMBER,
                active: HashMap::new(),
                by_contact: HashMap::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Books a table, or returns the existing reservation untouched
    /// when the same guest already submitted the same booking. The
    /// confirmation number is consumed only after every check has
    /// passed, so a failed call leaves the ledger exactly as it was.
    pub fn place(
        &self,
        restaurant: &Restaurant,
        request: BookingRequest,
    ) -> Result<Reservation, DomainError> {
        let mut state = self.state();

        if let Some(existing) = state.active.values().find(|reservation| {
            reservation.guest_email == request.guest_email
                && reservation.date_time == request.date_time
                && reservation.restaurant_id == restaurant.id
        }) {
            return Ok(existing.clone());
        }

        let confirmation_code = format!("RES{:06}", state.next_confirmation);
        let reservation = Reservation::new(
            derive_reservation_id(&confirmation_code),
            restaurant.id.0.clone(),
            restaurant.name.clone(),
            request.date_time,
            request.party_size,
            request.guest_name,
            request.guest_phone,
            request.guest_email,
            request.notes,
            confirmation_code,
        )?;

        state.next_confirmation += 1;
        index_contacts(&mut state.by_contact, &reservation);
        state.active.insert(reservation.id.0.clone(), reservation.clone());

        Ok(reservation)
    }

    /// Removes the reservation and hands back a one-shot receipt. A
    /// second cancel of the same id fails: the record is already gone.
    pub fn cancel(
        &self,
        reservation_id: &str,
        reason: Option<String>,
    ) -> Result<CancellationReceipt, DomainError> {
        let mut state = self.state();

        let Some(reservation) = state.active.remove(reservation_id) else {
            return Err(DomainError::ReservationNotFound {
                reservation_id: reservation_id.to_string(),
            });
        };

        unindex_contacts(&mut state.by_contact, &reservation);

        Ok(CancellationReceipt {
            reservation_id: reservation.id,
            restaurant_name: reservation.restaurant_name,
            original_date_time: reservation.date_time,
            cancelled_at: Utc::now(),
            reason,
            refund_policy: REFUND_POLICY.to_string(),
        })
    }

    /// Snapshots of every active reservation whose guest email or
    /// phone equals `user_id`, in booking order. Unknown users get an
    /// empty list, never an error.
    pub fn list_for_guest(&self, user_id: &str) -> Vec<Reservation> {
        let state = self.state();
        let Some(ids) = state.by_contact.get(user_id) else {
            return Vec::new();
        };

        ids.iter().filter_map(|id| state.active.get(&id.0)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReservationLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn index_contacts(index: &mut HashMap<String, Vec<ReservationId>>, reservation: &Reservation) {
    index.entry(reservation.guest_email.clone()).or_default().push(reservation.id.clone());
    if reservation.guest_phone != reservation.guest_email {
        index.entry(reservation.guest_phone.clone()).or_default().push(reservation.id.clone());
    }
}

fn unindex_contacts(index: &mut HashMap<String, Vec<ReservationId>>, reservation: &Reservation) {
    for contact in [&reservation.guest_email, &reservation.guest_phone] {
        if let Some(ids) = index.get_mut(contact.as_str()) {
            ids.retain(|id| id != &reservation.id);
            if ids.is_empty() {
                index.remove(contact.as_str());
            }
        }
    }
}

fn derive_reservation_id(confirmation_code: &str) -> String {
    let digest = Sha256::digest(confirmation_code.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    format!("reservation_{}", &hex[..12])
}

#[cfg(test)]
mod tests {
    use super::{BookingRequest, ReservationLedger};
    use crate::domain::location::Location;
    use crate::domain::reservation::REFUND_POLICY;
    use crate::domain::restaurant::Restaurant;
    use crate::errors::DomainError;

    fn venue() -> Restaurant {
        Restaurant::new(
            "rest_001",
            "Trattoria di Mare",
            "Italian",
            3,
            4.5,
            Location::new(42.3656, -71.0534, "123 Hanover St", "Boston", "MA", "02113"),
            "(617) 555-0101",
            "Authentic Italian seafood in the North End",
        )
        .expect("valid venue")
    }

    fn booking(email: &str, date_time: &str) -> BookingRequest {
        BookingRequest {
            date_time: date_time.to_string(),
            party_size: 4,
            guest_name: "Jane Doe".to_string(),
            guest_phone: "+1-555-123-4567".to_string(),
            guest_email: email.to_string(),
            notes: None,
        }
    }

    #[test]
    fn mints_sequential_confirmation_codes() {
        let ledger = ReservationLedger::new();
        let venue = venue();

        let first = ledger
            .place(&venue, booking("jane@example.com", "2025-03-15T19:00:00"))
            .expect("first booking");
        let second = ledger
            .place(&venue, booking("john@example.com", "2025-03-15T19:00:00"))
            .expect("second booking");

        assert_eq!(first.confirmation_code, "RES001000");
        assert_eq!(second.confirmation_code, "RES001001");
        assert!(first.id.0.starts_with("reservation_"));
        assert_eq!(first.id.0.len(), "reservation_".len() + 12);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn duplicate_submission_returns_the_original_untouched() {
        let ledger = ReservationLedger::new();
        let venue = venue();

        let original = ledger
            .place(&venue, booking("jane@example.com", "2025-03-15T19:00:00"))
            .expect("booking");

        // Same dedup key, different incidental details: the original
        // record wins wholesale.
        let mut replay = booking("jane@example.com", "2025-03-15T19:00:00");
        replay.guest_name = "J. Doe".to_string();
        replay.party_size = 6;

        let duplicate = ledger.place(&venue, replay).expect("idempotent replay");

        assert_eq!(duplicate, original);
        assert_eq!(duplicate.guest_name, "Jane Doe");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn rejected_party_size_leaves_no_trace() {
        let ledger = ReservationLedger::new();
        let venue = venue();

        let mut invalid = booking("jane@example.com", "2025-03-15T19:00:00");
        invalid.party_size = 0;

        let error = ledger.place(&venue, invalid).expect_err("party size 0 should fail");
        assert_eq!(error, DomainError::InvalidPartySize { value: 0 });
        assert!(ledger.is_empty());

        // The confirmation number was not consumed by the failed call.
        let next = ledger
            .place(&venue, booking("jane@example.com", "2025-03-15T19:00:00"))
            .expect("valid booking");
        assert_eq!(next.confirmation_code, "RES001000");
    }

    #[test]
    fn cancel_removes_the_record_and_returns_a_receipt() {
        let ledger = ReservationLedger::new();
        let venue = venue();

        let reservation = ledger
            .place(&venue, booking("jane@example.com", "2025-03-15T19:00:00"))
            .expect("booking");
        let receipt = ledger
            .cancel(&reservation.id.0, Some("change of plans".to_string()))
            .expect("cancellation");

        assert_eq!(receipt.reservation_id, reservation.id);
        assert_eq!(receipt.restaurant_name, "Trattoria di Mare");
        assert_eq!(receipt.original_date_time, "2025-03-15T19:00:00");
        assert_eq!(receipt.reason.as_deref(), Some("change of plans"));
        assert_eq!(receipt.refund_policy, REFUND_POLICY);
        assert!(ledger.is_empty());
    }

    #[test]
    fn cancelling_twice_fails_the_second_time() {
        let ledger = ReservationLedger::new();
        let venue = venue();

        let reservation = ledger
            .place(&venue, booking("jane@example.com", "2025-03-15T19:00:00"))
            .expect("booking");

        ledger.cancel(&reservation.id.0, None).expect("first cancel succeeds");
        let error = ledger.cancel(&reservation.id.0, None).expect_err("second cancel fails");

        assert_eq!(
            error,
            DomainError::ReservationNotFound { reservation_id: reservation.id.0.clone() }
        );
    }

    #[test]
    fn confirmation_numbers_are_never_reissued_after_cancellation() {
        let ledger = ReservationLedger::new();
        let venue = venue();

        let first = ledger
            .place(&venue, booking("jane@example.com", "2025-03-15T19:00:00"))
            .expect("booking");
        assert_eq!(first.confirmation_code, "RES001000");

        ledger.cancel(&first.id.0, None).expect("cancel");

        let second = ledger
            .place(&venue, booking("jane@example.com", "2025-03-16T19:00:00"))
            .expect("rebooking");
        assert_eq!(second.confirmation_code, "RES001001");
    }

    #[test]
    fn list_matches_on_email_or_phone() {
        let ledger = ReservationLedger::new();
        let venue = venue();

        let janes = ledger
            .place(&venue, booking("jane@example.com", "2025-03-15T19:00:00"))
            .expect("jane books");
        let mut johns_request = booking("john@example.com", "2025-03-15T19:00:00");
        johns_request.guest_phone = "+1-555-987-6543".to_string();
        ledger.place(&venue, johns_request).expect("john books");

        let by_email = ledger.list_for_guest("jane@example.com");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, janes.id);

        let by_phone = ledger.list_for_guest("+1-555-123-4567");
        assert_eq!(by_phone, by_email);

        assert!(ledger.list_for_guest("nobody@example.com").is_empty());
    }

    #[test]
    fn list_returns_bookings_in_booking_order() {
        let ledger = ReservationLedger::new();
        let venue = venue();

        let first = ledger
            .place(&venue, booking("jane@example.com", "2025-03-15T19:00:00"))
            .expect("first booking");
        let second = ledger
            .place(&venue, booking("jane@example.com", "2025-03-22T20:30:00"))
            .expect("second booking");

        let listed = ledger.list_for_guest("jane@example.com");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);

        ledger.cancel(&first.id.0, None).expect("cancel first");
        let remaining = ledger.list_for_guest("jane@example.com");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }
}
