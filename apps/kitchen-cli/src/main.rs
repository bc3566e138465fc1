//! # Kitchen CLI Entry Point
//!
//! ```text
//! kitchen corporate create --name "X Ltd" --contact-person Rahim \
//!     --contact-no 01712345678 --date 2025-01-31 \
//!     --item 2025-01-02,Economy,3,500 --item 2025-01-03,Premium,2,1000
//! kitchen list
//! kitchen show corporate <id> --json
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    kitchen_cli::run()
}
