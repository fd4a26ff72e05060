//! Compiled nomenclature patterns
//!
//! Each pattern is compiled once on first use and shared for the life of the
//! process.
//!
//! Copyright (c) 2025 utmkit Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use std::sync::OnceLock;

macro_rules! static_regex {
    ($(#[$meta:meta])* $name:ident, $pattern:expr) => {
        $(#[$meta])*
        pub(crate) fn $name() -> &'static Regex {
            static CELL: OnceLock<Regex> = OnceLock::new();
            CELL.get_or_init(|| Regex::new($pattern).expect(concat!("invalid pattern: ", $pattern)))
        }
    };
}

static_regex!(
    /// Full library convention `YYYY_MM_action[_variant]`
    canonical_campaign,
    r"^20[0-9]{2}_(0[1-9]|1[0-2])_[a-z][a-z0-9_]*(_[a-z0-9][a-z0-9_]*)?$"
);
static_regex!(four_digits, r"^[0-9]{4}$");
static_regex!(two_digits, r"^[0-9]{2}$");
static_regex!(action, r"^[a-z][a-z0-9_]*$");
static_regex!(variant, r"^[a-z0-9][a-z0-9_]*$");
static_regex!(
    /// `{name}` tokens left for the ad platform to substitute
    placeholder,
    r"\{[^}]*\}"
);
static_regex!(search_term, r"^[a-z0-9_]*$");
static_regex!(trailing_digits, r"[0-9]{3,}$");
static_regex!(custom_param, r"^[a-zA-Z0-9_]+=[a-zA-Z0-9_]+$");
