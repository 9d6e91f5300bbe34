//! Forno: an animated storefront showcase for an online pizzeria.
//!
//! The page is a vertical scroll of sections; the centerpiece is a
//! gallery section that reveals on scroll and hosts a seamlessly looping
//! image marquee of the featured menu. See [`app::marquee`] for the loop
//! contract and [`app::gallery`] for the reveal behavior.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub use app::FornoApp;
