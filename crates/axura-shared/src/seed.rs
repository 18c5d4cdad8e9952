//! The mock dataset served by the API and used as an offline fallback.

use crate::types::{SubscriptionStatus, UserRecord};

use SubscriptionStatus::{Paid, Unpaid};

const SEED: [(&str, &str, &str, SubscriptionStatus); 12] = [
    ("1", "John Doe", "john.doe@example.com", Paid),
    ("2", "Jane Smith", "jane.smith@example.com", Unpaid),
    ("3", "Bob Johnson", "bob.johnson@example.com", Paid),
    ("4", "Alice Williams", "alice.williams@example.com", Unpaid),
    ("5", "Charlie Brown", "charlie.brown@example.com", Paid),
    ("6", "Diana Prince", "diana.prince@example.com", Unpaid),
    ("7", "Edward Norton", "edward.norton@example.com", Paid),
    ("8", "Fiona Apple", "fiona.apple@example.com", Unpaid),
    ("9", "George Clooney", "george.clooney@example.com", Paid),
    ("10", "Helen Mirren", "helen.mirren@example.com", Unpaid),
    ("11", "Ian McKellen", "ian.mckellen@example.com", Paid),
    ("12", "Julia Roberts", "julia.roberts@example.com", Unpaid),
];

/// The twelve seeded users, in id order.
pub fn seed_users() -> Vec<UserRecord> {
    SEED.iter()
        .map(|&(id, name, email, status)| UserRecord::new(id, name, email, status))
        .collect()
}
