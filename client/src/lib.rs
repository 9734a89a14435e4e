//! # Panel Client Library
//!
//! Client-side data layer for the local player-monitoring service. The
//! service watches a running game and exposes a JSON-over-HTTP surface on a
//! fixed local origin; this crate keeps a live view of that state and pushes
//! the operator's annotations back.
//!
//! ## Architecture Overview
//!
//! Three components stack leaf to root:
//!
//! ### Transport (`transport`)
//! A single typed request function over HTTP+JSON. Every call returns a
//! tagged result; non-2xx responses surface the server's structured error
//! payload rather than a bare status, so call sites handle both branches
//! explicitly.
//!
//! ### Roster Poller (`poller`)
//! A recurring subscription that refetches the full roster every second and
//! republishes it wholesale through a watch channel. Failed ticks are logged
//! and skipped; the previous roster stays visible and the next tick heals.
//! Fetches may overlap, and the last response to resolve wins the published
//! value. Tearing a subscription down cancels future ticks and discards any
//! still-in-flight result via a generation token.
//!
//! ### Edit Sessions (`session`)
//! The optimistic-update protocols behind the annotation dialogs. A notes
//! save keeps the dialog open on failure so the draft survives for a retry;
//! a kick-tag commit mutates shared settings locally and always dismisses
//! its dialog, with the broader settings persist running best-effort and
//! reporting failures out-of-band.
//!
//! Presentation is out of scope: dialogs reach the core through typed
//! session operations and the [`session::ModalHost`] dismissal trait.

pub mod poller;
pub mod session;
pub mod transport;
