#![deny(
    unsafe_code,
    unused_must_use,
    unreachable_pub,
    rust_2018_idioms,
    missing_docs,
    clippy::pedantic
)]

//! Build-script helpers for the rosbridge code generator.
//!
//! This crate wires [`rosbridge_codegen::Generator`] into `build.rs` files:
//! interface definitions are generated into `OUT_DIR` and
//! `cargo:rerun-if-changed` directives keep the build incremental.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```rust,no_run
//! fn main() {
//!     let generated = rosbridge_build::generate_interfaces("interfaces")
//!         .expect("interface generation failed");
//!     println!("generated rosbridge types under {}", generated.display());
//! }
//! ```
//!
//! and in the crate, mount the tree:
//!
//! ```rust,ignore
//! mod interfaces {
//!     include!(concat!(env!("OUT_DIR"), "/rosbridge_interfaces/mod.rs"));
//! }
//! ```

use std::env::{self, VarError};
use std::path::{Path, PathBuf};

use thiserror::Error;

use rosbridge_codegen::{Generator, GeneratorError};

/// Header prepended to every generated file
pub const GENERATED_HEADER: &str =
    "// Auto-generated by rosbridge-build - do not edit";

/// Directory under `OUT_DIR` the generated tree is written into
pub const OUT_SUBDIR: &str = "rosbridge_interfaces";

/// Errors raised by the build helpers
#[derive(Error, Debug)]
pub enum BuildError {
    /// `OUT_DIR` is not set; the helper was called outside a build script
    #[error("OUT_DIR is not set: {0}")]
    MissingOutDir(#[from] VarError),

    /// Generation failed
    #[error(transparent)]
    Generate(#[from] GeneratorError),
}

/// A [`Generator`] preconfigured for build-script use
///
/// Scans `input_dir`, prepends [`GENERATED_HEADER`], and emits
/// `cargo:rerun-if-changed` directives. Call [`Generator::output_dir`] and
/// [`Generator::generate`] on the result, or use [`generate_interfaces`] for
/// the common case.
#[must_use]
pub fn generator<P: AsRef<Path>>(input_dir: P) -> Generator {
    Generator::new()
        .input_dir(input_dir)
        .header(GENERATED_HEADER)
        .emit_rerun_if_changed(true)
}

/// Generate the interface tree under `OUT_DIR` and return its root
///
/// # Errors
///
/// Returns [`BuildError::MissingOutDir`] outside a build script and
/// propagates generation failures.
pub fn generate_interfaces<P: AsRef<Path>>(input_dir: P) -> Result<PathBuf, BuildError> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?).join(OUT_SUBDIR);
    generate_interfaces_into(input_dir, &out_dir)?;
    Ok(out_dir)
}

/// Generate the interface tree into an explicit output directory
///
/// # Errors
///
/// Propagates generation failures.
pub fn generate_interfaces_into<P, Q>(input_dir: P, output_dir: Q) -> Result<Vec<PathBuf>, BuildError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Ok(generator(input_dir)
        .output_dir(output_dir.as_ref())
        .generate()?)
}
