//! Builder interface for the generation driver
//!
//! Files are processed independently: a file that fails to parse or emit is
//! logged and skipped so the rest of the set still generates, and no partial
//! output is written for it. Output IO errors are fatal.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use rosbridge_msg::{InterfaceKind, RosType, parse_interface_file};

use crate::config::CodegenConfig;
use crate::declaration::{Declaration, DeclarationSink, FsSink};
use crate::emit::Emitter;
use crate::errors::{GeneratorError, GeneratorResult};

/// Main generation driver (builder-style API)
///
/// # Example
///
/// ```no_run
/// use rosbridge_codegen::Generator;
///
/// Generator::new()
///     .input_dir("interfaces")
///     .output_dir("src/generated")
///     .module_prefix("generated")
///     .header("// Auto-generated - do not edit")
///     .emit_rerun_if_changed(true)
///     .generate()?;
/// # Ok::<(), rosbridge_codegen::GeneratorError>(())
/// ```
pub struct Generator {
    config: CodegenConfig,
    input_dir: Option<PathBuf>,
    input_files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    header: Option<String>,
    emit_rerun_if_changed: bool,
}

impl Generator {
    /// Create a generator with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CodegenConfig::new(),
            input_dir: None,
            input_files: Vec::new(),
            output_dir: None,
            header: None,
            emit_rerun_if_changed: false,
        }
    }

    /// Directory tree to scan for `.msg`/`.srv`/`.action` files
    #[must_use]
    pub fn input_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.input_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Add a single interface file
    #[must_use]
    pub fn include<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.input_files.push(file.as_ref().to_path_buf());
        self
    }

    /// Directory the generated tree is written into
    #[must_use]
    pub fn output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Module segments prepended to every output module
    #[must_use]
    pub fn module_prefix<S: AsRef<str>>(mut self, prefix: S) -> Self {
        self.config.module_prefix = prefix.as_ref().to_string();
        self
    }

    /// Path of the client crate referenced by generated wrappers
    #[must_use]
    pub fn client_crate<S: AsRef<str>>(mut self, path: S) -> Self {
        self.config.client_crate = path.as_ref().to_string();
        self
    }

    /// Module path holding the well-known message packages
    #[must_use]
    pub fn messages_root<S: AsRef<str>>(mut self, path: S) -> Self {
        self.config.messages_root = path.as_ref().to_string();
        self
    }

    /// Header comment prepended to every generated file
    #[must_use]
    pub fn header<S: AsRef<str>>(mut self, header: S) -> Self {
        self.header = Some(header.as_ref().to_string());
        self
    }

    /// Emit `cargo:rerun-if-changed` directives for the inputs
    #[must_use]
    pub fn emit_rerun_if_changed(mut self, enable: bool) -> Self {
        self.emit_rerun_if_changed = enable;
        self
    }

    /// Run the pipeline and return the written paths
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::OutputDirectoryRequired`] or
    /// [`GeneratorError::NoInputFiles`] for incomplete configuration,
    /// [`GeneratorError::InputFileNotFound`] for a missing explicit include,
    /// and IO errors from the output side. Per-file parse and emission
    /// failures are logged and skipped.
    pub fn generate(self) -> GeneratorResult<Vec<PathBuf>> {
        let output_dir = self
            .output_dir
            .as_ref()
            .ok_or(GeneratorError::OutputDirectoryRequired)?;

        let inputs = self.collect_inputs()?;
        if inputs.is_empty() {
            return Err(GeneratorError::NoInputFiles);
        }

        if self.emit_rerun_if_changed {
            if let Some(dir) = &self.input_dir {
                println!("cargo:rerun-if-changed={}", dir.display());
            }
            for file in &self.input_files {
                println!("cargo:rerun-if-changed={}", file.display());
            }
        }

        info!(
            inputs = inputs.len(),
            output = %output_dir.display(),
            "generating rosbridge types"
        );

        let mut sink = FsSink::new(output_dir);
        if let Some(header) = &self.header {
            sink = sink.with_header(header.clone());
        }

        let emitter = Emitter::new(&self.config);
        for (package, file) in &inputs {
            match Self::process_file(&emitter, package.as_deref(), file) {
                Ok(declarations) => {
                    for declaration in &declarations {
                        sink.accept(declaration)?;
                    }
                    debug!(file = %file.display(), count = declarations.len(), "generated");
                }
                Err(error) => {
                    warn!(file = %file.display(), %error, "skipping interface file");
                }
            }
        }
        sink.finish()?;

        Ok(sink.into_written())
    }

    /// Parse and emit one file; any failure discards the whole file
    fn process_file(
        emitter: &Emitter<'_>,
        package: Option<&str>,
        file: &Path,
    ) -> GeneratorResult<Vec<Declaration>> {
        let ros_type: RosType = parse_interface_file(package, file)?;
        Ok(emitter.emit(&ros_type)?)
    }

    fn collect_inputs(&self) -> GeneratorResult<Vec<(Option<String>, PathBuf)>> {
        let mut inputs = Vec::new();

        if let Some(root) = &self.input_dir {
            let mut discovered = Vec::new();
            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(std::io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.into_path();
                if path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| InterfaceKind::from_extension(e).is_some())
                {
                    let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                    discovered.push((package_of(&relative), path));
                }
            }
            inputs.extend(discovered);
        }

        for file in &self.input_files {
            if !file.is_file() {
                return Err(GeneratorError::InputFileNotFound { path: file.clone() });
            }
            inputs.push((standalone_package_of(file), file.clone()));
        }

        Ok(inputs)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Package of a file relative to the input root: the directory path above
/// the file, minus a trailing `msg`/`srv`/`action` interface directory
fn package_of(relative: &Path) -> Option<String> {
    let dir = strip_kind_dir(relative.parent()?);
    let joined: Vec<&str> = dir
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join("/"))
    }
}

/// Package of an explicitly included file: the name of its containing
/// directory, minus a trailing interface directory
fn standalone_package_of(file: &Path) -> Option<String> {
    let dir = strip_kind_dir(file.parent()?);
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(ToString::to_string)
}

fn strip_kind_dir(dir: &Path) -> &Path {
    match dir.file_name().and_then(|n| n.to_str()) {
        Some("msg" | "srv" | "action") => dir.parent().unwrap_or(dir),
        _ => dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_of_layouts() {
        assert_eq!(
            package_of(Path::new("geometry_msgs/msg/Twist.msg")).as_deref(),
            Some("geometry_msgs")
        );
        assert_eq!(
            package_of(Path::new("geometry_msgs/Twist.msg")).as_deref(),
            Some("geometry_msgs")
        );
        assert_eq!(
            package_of(Path::new("vendor/custom_msgs/srv/Reset.srv")).as_deref(),
            Some("vendor/custom_msgs")
        );
        assert_eq!(package_of(Path::new("Twist.msg")), None);
        assert_eq!(package_of(Path::new("msg/Twist.msg")), None);
    }

    #[test]
    fn test_standalone_package_of() {
        assert_eq!(
            standalone_package_of(Path::new("/tmp/interfaces/my_msgs/msg/Imu.msg")).as_deref(),
            Some("my_msgs")
        );
        assert_eq!(
            standalone_package_of(Path::new("/tmp/my_msgs/Imu.msg")).as_deref(),
            Some("my_msgs")
        );
    }

    #[test]
    fn test_missing_output_dir_is_rejected() {
        let err = Generator::new().generate().unwrap_err();
        assert!(matches!(err, GeneratorError::OutputDirectoryRequired));
    }

    #[test]
    fn test_no_inputs_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Generator::new()
            .output_dir(dir.path())
            .generate()
            .unwrap_err();
        assert!(matches!(err, GeneratorError::NoInputFiles));
    }
}
