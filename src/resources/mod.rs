//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – animation definitions reused across entities
//! - `camera` – shared camera plus projection and culling math
//! - `canvas` – canvas trait and the software frame canvas
//! - `gameconfig` – settings loaded from `config.ini`
//! - `renderstats` – drawn/skipped counters for the last frame
//! - `screensize` – viewport dimensions in pixels
//! - `viewstore` – pre-rendered sprite stack views keyed by sheet name
pub mod animationstore;
pub mod camera;
pub mod canvas;
pub mod gameconfig;
pub mod renderstats;
pub mod screensize;
pub mod viewstore;
