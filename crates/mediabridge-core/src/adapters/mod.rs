//! Pure mappings from validated provider shapes to domain models.
//!
//! Adapters borrow their input, perform no I/O and cannot fail: every enum
//! translation ends in an explicit default arm. Adapting the same value twice
//! yields equal output.
//!
//! | Module | Provider |
//! |--------|----------|
//! | [`jellyfin`] | media server |
//! | [`jellyseerr`] | request broker |
//! | [`radarr`] | movie manager |
//! | [`sonarr`] | series manager |
//! | [`arr`] | queue, image and lookup mappings shared by both managers |

pub(crate) mod arr;
pub(crate) mod jellyfin;
pub(crate) mod jellyseerr;
pub(crate) mod radarr;
pub(crate) mod sonarr;
