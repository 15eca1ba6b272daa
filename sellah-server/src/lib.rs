//! Sellah Server - order lifecycle backend for the Sellah storefront SaaS
//!
//! # Architecture overview
//!
//! - **Orders engine** (`orders`): status transition enforcement, stock
//!   reservation/compensation, audit and notification recording, bulk
//!   driver. The only writer of order status.
//! - **Database** (`db`): embedded SurrealDB document store and the
//!   per-collection repositories.
//! - **HTTP API** (`api`): axum routers the dashboard calls, with the
//!   tenant/actor context extracted per request.
//! - **Core** (`core`): configuration, shared state, server lifecycle.
//!
//! # Module structure
//!
//! ```text
//! sellah-server/src/
//! ├── core/          # config, state, HTTP server
//! ├── db/            # store handle + repositories
//! ├── orders/        # order lifecycle engine
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use orders::{BulkOutcome, FlowError, OrderStatusCoordinator, StockLedger};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____      ____      __
  / ___/___  / / /___ _/ /_
  \__ \/ _ \/ / / __ `/ __ \
 ___/ /  __/ / / /_/ / / / /
/____/\___/_/_/\__,_/_/ /_/
    "#
    );
}
