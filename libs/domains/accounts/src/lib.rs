//! Accounts Domain
//!
//! Users are identified by email. Catalog rows carry an [`AuditStamp`]
//! pointing back at the users who created and last changed them.
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← validation, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory / Postgres
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, CreateUser, AuditStamp
//! └─────────────┘
//! ```
//!
//! ```rust,no_run
//! use domain_accounts::{AccountService, CreateUser, InMemoryUserRepository};
//!
//! # async fn example() -> domain_accounts::AccountResult<()> {
//! let service = AccountService::new(InMemoryUserRepository::new());
//! let user = service.register(CreateUser::new("staff@example.com")).await?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use audit::AuditStamp;
pub use error::{AccountError, AccountResult};
pub use models::{normalize_email, CreateUser, User};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::AccountService;
