//! Enumeration of guide sites adjacent to a protospacer-adjacent motif on either strand.

pub mod finder;
pub mod pam;

pub use finder::{find_pam_sites, PamSiteFinder};
pub use pam::{CasSystem, PamMatcher, PAM_WINDOW};
