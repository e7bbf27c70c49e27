//! Fuzz target for boundary credential parsing
//!
//! # Invariants
//!
//! - Parsing NEVER panics on arbitrary input
//! - A parsed identifier never contains the reserved separator
//! - Rejection happens before any state could be touched (pure function)

#![no_main]

use libfuzzer_sys::fuzz_target;

use gatehouse_core::Credentials;

fuzz_target!(|input: &str| {
    if let Ok(credentials) = Credentials::parse(input) {
        let (user, _password) = credentials.into_parts();
        assert!(!user.as_str().contains(':'));
        assert!(!user.as_str().is_empty());
    }
});
