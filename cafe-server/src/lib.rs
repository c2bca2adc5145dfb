//! Cafe Server - restaurant order management
//!
//! ```text
//! cafe-server/src/
//! ├── core/      # config, state, server, errors
//! ├── db/        # SQLite pool, migrations, repositories
//! ├── orders/    # items, validation, search, lifecycle service
//! ├── auth/      # passwords, sessions, extractors, login
//! ├── notify/    # admin login notifications
//! ├── api/       # HTTP routes and handlers
//! └── utils/     # logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod utils;

pub use auth::{AuthService, WorkerSession};
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event logging under the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______      ____
  / ____/___ _/ __/__
 / /   / __ `/ /_/ _ \
/ /___/ /_/ / __/  __/
\____/\__,_/_/  \___/
    "#
    );
}
