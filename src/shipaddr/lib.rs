//! # Shipaddr Architecture
//!
//! Shipaddr is the **address selection and edit-state core** of a checkout shipping step.
//! It is a UI-agnostic library that happens to ship a small CLI client, not the other way
//! around: the same core can sit behind a web page, a native view or a terminal.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Renderer (renderer.rs) + Controller (controller.rs)        │
//! │  - One instance per rendered address                        │
//! │  - Selection flag, labels, select/edit/update/delete        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Mutation logic, returns structured CmdResult             │
//! │  - Never panics, never surfaces errors as faults            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shared State + Collaborators                               │
//! │  - Observable cells (state.rs), shared form (form.rs)       │
//! │  - AddressGateway, SessionCache, HostPage, Prompter traits  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shared State
//!
//! A checkout page renders many addresses but has exactly one active shipping address,
//! one edit form and one edit popup. These live in a [`context::CheckoutContext`] that
//! every renderer holds a handle to. Nothing here is a global.
//!
//! The core is single-threaded: shared state is `Rc`/`RefCell` based, and the
//! gateway/prompt calls are futures that the host drives on its own event loop.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): the bulk of the tests, against
//!    [`gateway::memory::InMemoryGateway`] and the headless host collaborators.
//! 2. **Leaf components** (`attributes`, `country`, `selection`, `form`): unit tests.
//! 3. **CLI** (`tests/`): end-to-end runs of the binary over a temp data dir.
//!
//! ## Module Overview
//!
//! - [`model`]: `Address`, keys, custom attribute values
//! - [`attributes`]: option tables and custom attribute label resolution
//! - [`country`]: country code → display name
//! - [`state`]: `Observable<T>`, active shipping address, popup state
//! - [`selection`]: derived "is this address selected" flag
//! - [`form`]: the shared edit form and the address → form binder
//! - [`list`]: the ordered address collection backing the rendered list
//! - [`gateway`]: persistence gateway trait and backends
//! - [`session`]: checkout-session cache of the selected key
//! - [`host`]: host page signals and user prompts
//! - [`context`]: the injected bundle of shared state and collaborators
//! - [`commands`]: select / edit / update / delete logic
//! - [`controller`]: per-address facade over the commands
//! - [`renderer`]: per-address view-model
//! - [`config`]: messages and field names
//! - [`error`]: error types

pub mod attributes;
pub mod commands;
pub mod config;
pub mod context;
pub mod controller;
pub mod country;
pub mod error;
pub mod form;
pub mod gateway;
pub mod host;
pub mod list;
pub mod model;
pub mod renderer;
pub mod selection;
pub mod session;
pub mod state;
