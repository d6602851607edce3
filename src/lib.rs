#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

//! # pgDeck
//!
//! Server-rendered web console for a PostgreSQL administration API.
//!
//! pgDeck serves a browser console and translates every action into calls
//! against a separate administration API over HTTP. It holds no database
//! connection of its own: all SQL execution, validation, and session state
//! live behind the API, and the console renders whatever the API reports.
//!
//! ## Features
//!
//! - **Tables**: browse rows and schemas, create and drop tables, alter
//!   columns, insert, update, and delete rows
//! - **Query builder**: compose SELECT statements with filters, joins,
//!   aggregates, grouping, ordering, and pagination - without writing SQL
//! - **Indexes & views**: manage indexes across access methods, and create,
//!   inspect, and modify the four supported view flavors
//! - **Sequences**: create, inspect, advance, and re-align sequences
//! - **Transactions**: drive session transaction state, savepoints,
//!   isolation levels, two-phase commit, notifications, and advisory locks
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve the console against an API at localhost:8000
//! pgdeck
//!
//! # Point at a different backend
//! pgdeck --api-url http://db-admin.example.com:8000 --listen-addr 0.0.0.0:3000
//! ```

pub mod client;
pub mod error;
pub mod query;
pub mod routes;
pub mod server;
pub mod sql;
pub mod templates;

pub use client::{BackendClient, BackendClientConfig, ClientError};
pub use error::{ConsoleError, Result};
pub use query::{QuerySpec, SelectForm};
pub use routes::create_router;
pub use server::{ConsoleConfig, ConsoleServer, ConsoleState};
pub use templates::Templates;
