//! In-memory sandbox backend for sfmig.
//!
//! This crate provides an in-memory implementation of the `SandboxClient`
//! trait from `sfmig-sandbox`, using a papaya lock-free HashMap. It is the
//! stand-in for a real CRM sandbox in tests, with switches to simulate
//! lookup and delete failures.
//!
//! # Example
//!
//! ```ignore
//! use sfmig_core::{RecordBuilder, SObjectType};
//! use sfmig_sandbox::SandboxClient;
//! use sfmig_sandbox_memory::InMemorySandbox;
//!
//! let sandbox_a = InMemorySandbox::named("A");
//! let contact = RecordBuilder::new().with("Email", "x@y").build();
//! let created = sandbox_a.create(SObjectType::Contact, &contact).await?;
//! ```

pub mod sandbox;

pub use sandbox::{InMemorySandbox, RecordKey};
