//! Entity id minting.
//!
//! Ids are type-prefixed epoch-millisecond tokens (`t1718121600000`), the
//! scheme the stored documents already use. A process-wide monotonic guard
//! bumps the millisecond value when two mints land in the same instant, so
//! ids stay unique without changing shape.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

pub const TRANSACTION_ID_PREFIX: &str = "t";
pub const MEMBER_ID_PREFIX: &str = "m";
pub const GOAL_ID_PREFIX: &str = "g";
pub const CARD_ID_PREFIX: &str = "c";

static LAST_ISSUED_MS: AtomicI64 = AtomicI64::new(0);

/// Mints a fresh id for the given entity prefix.
pub fn mint_entity_id(prefix: &str) -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ISSUED_MS.load(Ordering::Relaxed);
    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_ISSUED_MS.compare_exchange(last, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return format!("{}{}", prefix, next),
            Err(actual) => last = actual,
        }
    }
}
