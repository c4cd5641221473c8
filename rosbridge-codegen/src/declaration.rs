//! Declaration trees and the writer boundary
//!
//! The emitter produces immutable [`Declaration`] values; serializing them to
//! disk is the job of a [`DeclarationSink`]. The core never touches the
//! filesystem except through that narrow interface, so emission stays
//! testable without IO.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use heck::ToSnakeCase;
use proc_macro2::TokenStream;

use crate::errors::CodegenResult;

/// One generated type, ready for serialization to a source file
///
/// Immutable once built; handed to a sink exactly once.
#[derive(Debug, Clone)]
pub struct Declaration {
    module: String,
    name: String,
    tokens: TokenStream,
}

impl Declaration {
    pub(crate) fn new(module: String, name: String, tokens: TokenStream) -> Self {
        Self {
            module,
            name,
            tokens,
        }
    }

    /// `::`-separated output module path, possibly empty
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Type name of the declaration (e.g. `TwistTopic`)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration's token tree
    #[must_use]
    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Render the declaration to formatted Rust source
    ///
    /// # Errors
    ///
    /// Returns a [`syn::Error`] if the token tree does not form a valid file.
    pub fn render(&self) -> Result<String, syn::Error> {
        let file = syn::parse2::<syn::File>(self.tokens.clone())?;
        Ok(prettyplease::unparse(&file))
    }

    /// File name for the declaration (`TwistTopic` becomes `twist_topic.rs`)
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name.to_snake_case())
    }

    /// Output path relative to the generation root
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.module_segments().collect();
        path.push(self.file_name());
        path
    }

    pub(crate) fn module_segments(&self) -> impl Iterator<Item = &str> {
        self.module.split("::").filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.module, self.name)
        }
    }
}

/// Narrow writer boundary: accepts finished declarations, owns all IO
pub trait DeclarationSink {
    /// Accept one declaration for serialization
    ///
    /// # Errors
    ///
    /// Returns a [`crate::CodegenError`] if the declaration cannot be
    /// rendered or written.
    fn accept(&mut self, declaration: &Declaration) -> CodegenResult<()>;

    /// Called once after the last declaration
    ///
    /// # Errors
    ///
    /// Returns a [`crate::CodegenError`] on IO failure.
    fn finish(&mut self) -> CodegenResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ModuleEntries {
    submodules: BTreeSet<String>,
    files: BTreeSet<String>,
}

/// Filesystem sink writing one file per declaration plus `mod.rs` indexes
///
/// Declarations land at `<root>/<module path>/<snake_case name>.rs`. Each
/// directory gets a `mod.rs` that re-exports the contents of its files, so
/// sibling declarations can reference each other through their parent module.
#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
    header: Option<String>,
    modules: BTreeMap<PathBuf, ModuleEntries>,
    written: Vec<PathBuf>,
}

impl FsSink {
    /// Create a sink rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            header: None,
            modules: BTreeMap::new(),
            written: Vec::new(),
        }
    }

    /// Prepend a header comment to every written file
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Paths written so far, in write order
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Consume the sink, returning the written paths
    #[must_use]
    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }

    fn write_source(&mut self, path: &Path, body: &str) -> CodegenResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = match &self.header {
            Some(header) => format!("{header}\n{body}"),
            None => body.to_string(),
        };
        fs::write(path, content)?;
        self.written.push(path.to_path_buf());
        Ok(())
    }

    fn register(&mut self, declaration: &Declaration) {
        let mut dir = self.root.clone();
        for segment in declaration.module_segments() {
            self.modules
                .entry(dir.clone())
                .or_default()
                .submodules
                .insert(segment.to_string());
            dir.push(segment);
        }
        self.modules
            .entry(dir)
            .or_default()
            .files
            .insert(declaration.name.to_snake_case());
    }
}

impl DeclarationSink for FsSink {
    fn accept(&mut self, declaration: &Declaration) -> CodegenResult<()> {
        let body = declaration.render()?;
        let path = self.root.join(declaration.relative_path());
        self.write_source(&path, &body)?;
        self.register(declaration);
        Ok(())
    }

    fn finish(&mut self) -> CodegenResult<()> {
        let modules = std::mem::take(&mut self.modules);
        for (dir, entries) in &modules {
            // include!-based indexes keep the tree mountable from OUT_DIR,
            // where plain `mod foo;` declarations would not resolve.
            let mut content = String::new();
            for submodule in &entries.submodules {
                content.push_str(&format!(
                    "pub mod {submodule} {{\n    include!(\"{submodule}/mod.rs\");\n}}\n"
                ));
            }
            for file in &entries.files {
                content.push_str(&format!(
                    "mod {file} {{\n    include!(\"{file}.rs\");\n}}\npub use {file}::*;\n"
                ));
            }
            self.write_source(&dir.join("mod.rs"), &content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn declaration(module: &str, name: &str) -> Declaration {
        let tokens = quote! {
            pub struct Sample {
                pub x: f64,
            }
        };
        Declaration::new(module.to_string(), name.to_string(), tokens)
    }

    #[test]
    fn test_relative_path() {
        let decl = declaration("msgs::geometry_msgs", "TwistTopic");
        assert_eq!(
            decl.relative_path(),
            PathBuf::from("msgs/geometry_msgs/twist_topic.rs")
        );

        let decl = declaration("", "Twist");
        assert_eq!(decl.relative_path(), PathBuf::from("twist.rs"));
    }

    #[test]
    fn test_render_is_formatted() {
        let decl = declaration("geometry_msgs", "Sample");
        let rendered = decl.render().unwrap();
        assert!(rendered.contains("pub struct Sample"));
        assert!(rendered.contains("pub x: f64"));
    }

    #[test]
    fn test_fs_sink_writes_files_and_modules() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSink::new(dir.path()).with_header("// generated - do not edit");

        sink.accept(&declaration("geometry_msgs", "Twist")).unwrap();
        sink.accept(&declaration("geometry_msgs", "TwistTopic"))
            .unwrap();
        sink.finish().unwrap();

        let twist = dir.path().join("geometry_msgs/twist.rs");
        let content = fs::read_to_string(&twist).unwrap();
        assert!(content.starts_with("// generated - do not edit"));

        let module = fs::read_to_string(dir.path().join("geometry_msgs/mod.rs")).unwrap();
        assert!(module.contains("mod twist {"));
        assert!(module.contains("include!(\"twist.rs\");"));
        assert!(module.contains("pub use twist::*;"));
        assert!(module.contains("include!(\"twist_topic.rs\");"));

        let root_module = fs::read_to_string(dir.path().join("mod.rs")).unwrap();
        assert!(root_module.contains("pub mod geometry_msgs {"));
        assert!(root_module.contains("include!(\"geometry_msgs/mod.rs\");"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            declaration("geometry_msgs", "Twist").to_string(),
            "geometry_msgs::Twist"
        );
        assert_eq!(declaration("", "Twist").to_string(), "Twist");
    }
}
