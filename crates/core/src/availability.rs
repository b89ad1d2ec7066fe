use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime};
use sha2::{Digest, Sha256};

use crate::domain::restaurant::Restaurant;
use crate::domain::slot::AvailabilitySlot;
use crate::errors::DomainError;

/// Daily seatings, as (hour, minute) pairs in ascending order.
const LUNCH_TIMES: [(u32, u32); 5] = [(11, 30), (12, 0), (12, 30), (13, 0), (13, 30)];
const DINNER_TIMES: [(u32, u32); 8] =
    [(17, 0), (17, 30), (18, 0), (18, 30), (19, 0), (19, 30), (20, 0), (20, 30)];

/// Per-slot capacity baseline: larger tables at the pricier venues.
const LARGE_TABLE_BASE: i64 = 8;
const SMALL_TABLE_BASE: i64 = 6;

const NAIVE_SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Derives the day's slots for one venue. Availability and capacity
/// come from a stable hash over (restaurant id, slot time, party
/// size), so identical inputs always reproduce identical output. Only
/// the calendar date of `date_time` matters; its time of day is
/// discarded. Slots keep the input's UTC offset when it has one.
pub fn generate_slots(
    restaurant: &Restaurant,
    date_time: &str,
    party_size: i64,
) -> Result<Vec<AvailabilitySlot>, DomainError> {
    let anchor = parse_date_time(date_time)?;
    let mut slots = Vec::with_capacity(LUNCH_TIMES.len() + DINNER_TIMES.len());

    for &(hour, minute) in LUNCH_TIMES.iter().chain(DINNER_TIMES.iter()) {
        let Some(slot_time) = anchor.date().and_hms_opt(hour, minute, 0) else {
            continue;
        };
        let time = anchor.label_for(slot_time);
        let entropy = slot_entropy(&slot_seed(restaurant, &time, party_size));

        // Roughly 70% of slots pass the coin-flip; the rest read as taken.
        let open = entropy % 10 < 7;
        let base =
            if restaurant.price_tier >= 3 { LARGE_TABLE_BASE } else { SMALL_TABLE_BASE };
        let max_party_size = base + (entropy % 3) as i64;

        slots.push(AvailabilitySlot {
            time,
            max_party_size,
            available: open && party_size <= max_party_size,
        });
    }

    Ok(slots)
}

/// The input either carries a UTC offset ("Z" or "+05:30") or is a
/// naive local stamp. Slot labels are rendered the same way back.
enum ParsedDateTime {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl ParsedDateTime {
    fn date(&self) -> NaiveDate {
        match self {
            Self::Zoned(stamp) => stamp.date_naive(),
            Self::Naive(stamp) => stamp.date(),
        }
    }

    fn label_for(&self, slot_time: NaiveDateTime) -> String {
        match self {
            Self::Zoned(stamp) => match slot_time.and_local_timezone(*stamp.offset()) {
                LocalResult::Single(zoned) => zoned.to_rfc3339(),
                _ => slot_time.format(NAIVE_SLOT_FORMAT).to_string(),
            },
            Self::Naive(_) => slot_time.format(NAIVE_SLOT_FORMAT).to_string(),
        }
    }
}

fn parse_date_time(value: &str) -> Result<ParsedDateTime, DomainError> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
        return Ok(ParsedDateTime::Zoned(zoned));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ParsedDateTime::Naive(naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(ParsedDateTime::Naive(naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(ParsedDateTime::Naive(naive));
        }
    }

    Err(DomainError::InvalidDateTime { value: value.to_string() })
}

fn slot_seed(restaurant: &Restaurant, slot_label: &str, party_size: i64) -> String {
    format!("{}_{}_{}", restaurant.id.0, slot_label, party_size)
}

/// Stable, well-distributed entropy for one slot: the low eight bytes
/// of a SHA-256 digest over the seed string.
fn slot_entropy(seed: &str) -> u64 {
    let digest = Sha256::digest(seed.as_bytes());
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&digest[digest.len() - 8..]);
    u64::from_be_bytes(tail)
}
