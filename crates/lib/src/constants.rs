//! Constants used throughout the chatbox library.
//!
//! Central definitions for the trigger word, display colours, and the
//! status strings surfaced to the UI boundary.

/// Substring that makes the server append a plot entry.
///
/// Matched case-sensitively anywhere in the message, not on word boundaries.
pub const PLOT_TRIGGER: &str = "plot";

/// Display colour for entries sent by the user.
pub const USER_COLOR: &str = "#007BFF";

/// Display colour for entries sent by the server.
pub const SERVER_COLOR: &str = "#FF5733";

/// Status shown while a request is outstanding.
pub const STATUS_WORKING: &str = "Sending request";

/// Status prefix used once a request has completed.
pub const STATUS_DONE: &str = "Complete the request";

/// Status shown when the user submitted nothing.
pub const STATUS_NO_MESSAGE: &str = "Error: No Message";
