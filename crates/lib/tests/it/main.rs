/*! Integration tests for chatbox.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - segment: Tests for splitting messages into plain and tagged segments
 * - transcript: Tests for submit and the append-only transcript model
 * - render: Tests for projecting transcripts into render nodes
 * - session: Tests for the per-session request guard and status line
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("chatbox=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod render;
mod segment;
mod session;
mod transcript;
