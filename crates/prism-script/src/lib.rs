//! JSON scene scripts for Prism.
//!
//! A script is an ordered list of statements (`render`, `camera`,
//! `material`, `sphere`, `plane`, `light`) applied to a [`Scene`] one at a
//! time. See [`statement`] for the schema.
//!
//! ```
//! use prism_scene::Scene;
//!
//! let mut scene = Scene::default();
//! let summary = prism_script::run_str(
//!     r#"[
//!         { "material": { "name": "white", "color": [1, 1, 1] } },
//!         { "sphere": { "center": [0, 0, 0], "radius": 1, "material": "white" } },
//!         { "light": { "shape": { "sphere": { "center": [0, 4, 0], "radius": 0.5 } }, "emission": [5, 5, 5] } }
//!     ]"#,
//!     &mut scene,
//! )
//! .unwrap();
//! assert_eq!(summary.objects, 2);
//! assert_eq!(scene.light_count(), 1);
//! ```
//!
//! [`Scene`]: prism_scene::Scene

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod runner;
pub mod statement;

pub use error::ScriptError;
pub use runner::{run_file, run_str, ScriptSummary};
pub use statement::Statement;
