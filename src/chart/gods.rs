//! Ten-God derivation against a reference Day Stem

use crate::core::tables::{god_name, hidden_stems, relation};
use crate::core::types::{Branch, Stem, TenGod};

/// Ten-God label of `other` relative to `reference`
///
/// Total over the closed stem enumeration: element and relation lookups
/// cannot miss. The concrete label is keyed by the OTHER stem's polarity,
/// never the reference's.
pub fn ten_god(reference: Stem, other: Stem) -> TenGod {
    let class = relation(reference.element(), other.element());
    god_name(class, other.polarity())
}

/// Ten-God labels for a branch's hidden stems, in canonical hidden order
pub fn branch_hidden_gods(reference: Stem, branch: Branch) -> Vec<(Stem, TenGod)> {
    hidden_stems(branch)
        .iter()
        .map(|&hidden| (hidden, ten_god(reference, hidden)))
        .collect()
}
