//! Folio Server - HTTP REST API for image similarity
//!
//! Serves "find similar" and pairwise comparison over an image catalog,
//! ranked by blended tag and embedding similarity.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with catalog size
//! - `GET /api/v1/images/{id}/similar?limit=N` - Similar images from the same owner
//! - `POST /api/v1/compare` - Score one image against another
//!
//! Configuration comes from `.env`, an optional `server.{toml,yaml,json}`
//! file and `FOLIO_SERVER__*` environment variables.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
