mod edd;
mod spt;

pub use edd::{edd, Edd};
pub use spt::{spt, Spt};

use crate::core::Rule;

/// Constructors of every available sequencing rule.
#[allow(unsafe_code)]
#[linkme::distributed_slice]
pub static RULES: [fn() -> Box<dyn Rule>];

/// Returns the rule registered under the given name, ignoring case.
#[must_use]
pub fn find(name: &str) -> Option<Box<dyn Rule>> {
    RULES
        .iter()
        .map(|init| init())
        .find(|rule| rule.name().eq_ignore_ascii_case(name))
}
