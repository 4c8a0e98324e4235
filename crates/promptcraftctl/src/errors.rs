//! Error codes and exit status for promptcraftctl

use promptcraft_common::PromptcraftError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the gateway is unreachable
pub const EXIT_BACKEND_UNAVAILABLE: i32 = 70;

/// Exit code when no API key is stored
pub const EXIT_MISSING_CREDENTIAL: i32 = 77;

pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PromptcraftError>() {
        Some(PromptcraftError::MissingCredential) => EXIT_MISSING_CREDENTIAL,
        Some(e) if e.is_transport() => EXIT_BACKEND_UNAVAILABLE,
        _ => EXIT_GENERAL_ERROR,
    }
}
