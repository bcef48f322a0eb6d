//! # subrules-model
//!
//! The typed rule subscription document and the normalizing parser that
//! produces it.
//!
//! ## Overview
//!
//! - [`Subscription`] -- the root document, owning [`App`]s, which own
//!   [`Group`]s, which own [`Rule`]s.
//! - [`CommonProps`] / [`HasCommonProps`] -- targeting properties each level
//!   carries independently.
//! - [`StringFilter`], [`NumberFilter`], [`AppFilter`], [`DeviceFilter`] --
//!   constraint filters decoded by field name.
//! - [`SubscriptionCodec`] -- parse strict or relaxed text, encode canonical
//!   JSON.
//! - [`SelectorChecker`] -- the selector syntax collaborator behind
//!   [`Group::check_selectors`]; [`Group::is_valid`] caches the verdict of
//!   [`BalancedSelectorChecker`].
//! - [`find_duplicates`] -- non-fatal duplicate identity report.

pub mod builder;
pub mod codec;
pub mod document;
pub mod filter;
pub mod lint;
pub mod selector;

pub use codec::{CodecConfig, StrictJson, SubscriptionCodec, Transcoder};
pub use document::{App, CommonProps, Group, HasCommonProps, Rule, Subscription};
pub use filter::{AppFilter, DeviceFilter, NumberFilter, StringFilter};
pub use lint::{find_duplicates, Duplicate};
pub use selector::{BalancedSelectorChecker, SelectorChecker};
pub use subrules_core::{Error, Result};
