//! Knobs controlling how a YAML stream is loaded.

use std::{fmt, rc::Rc};

use crate::Warning;

/// The default maximum nesting depth of a document.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// The default maximum length, in bytes, of the string a mapping key is stored under.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 64 * 1024;

/// A callback receiving the warnings raised while loading.
pub type WarningSink = Rc<dyn Fn(&Warning)>;

/// Options of a loading session.
///
/// ```
/// # use tessera_parser::Options;
/// let options = Options::default().filename("config.yaml").strict(true);
/// assert!(options.is_strict());
/// assert_eq!(options.get_filename(), Some("config.yaml"));
/// ```
#[derive(Clone)]
pub struct Options {
    filename: Option<String>,
    resolve: bool,
    validate: bool,
    strict: bool,
    legacy: bool,
    max_depth: usize,
    max_key_length: usize,
    on_warning: Option<WarningSink>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filename: None,
            resolve: true,
            validate: true,
            strict: false,
            legacy: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            on_warning: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("filename", &self.filename)
            .field("resolve", &self.resolve)
            .field("validate", &self.validate)
            .field("strict", &self.strict)
            .field("legacy", &self.legacy)
            .field("max_depth", &self.max_depth)
            .field("max_key_length", &self.max_key_length)
            .field("on_warning", &self.on_warning.as_ref().map(|_| "Fn(&Warning)"))
            .finish()
    }
}

impl Options {
    /// Set the name of the file being loaded.
    ///
    /// The name only shows up in error and warning markers.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Whether plain scalars go through the implicit types of the schema (default: `true`).
    ///
    /// When disabled, plain scalars are kept as strings tagged with `?`.
    #[must_use]
    pub fn resolve(mut self, enabled: bool) -> Self {
        self.resolve = enabled;
        self
    }

    /// Whether to validate characters and tags (default: `true`).
    ///
    /// This enables the non-printable character check on the whole stream, the JSON-compatibility
    /// check of quoted scalars and the pattern checks on tag handles and tag names.
    #[must_use]
    pub fn validate(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Whether warnings are turned into errors (default: `false`).
    #[must_use]
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Whether documents are read the YAML 1.1 way by default (default: `false`).
    ///
    /// In legacy mode, documents containing non-ASCII line breaks raise a warning, as they would
    /// with a `%YAML 1.1` directive.
    #[must_use]
    pub fn legacy(mut self, enabled: bool) -> Self {
        self.legacy = enabled;
        self
    }

    /// Set the maximum nesting depth of a document (default: [`DEFAULT_MAX_DEPTH`]).
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum length of a mapping key (default: [`DEFAULT_MAX_KEY_LENGTH`]).
    ///
    /// Collection keys are stored under their flow-style rendering. A key made of aliases may
    /// render far larger than the input, so a longer key is an error.
    #[must_use]
    pub fn max_key_length(mut self, length: usize) -> Self {
        self.max_key_length = length;
        self
    }

    /// Set the handler receiving warnings.
    ///
    /// Without a handler, warnings are logged with [`tracing::warn!`].
    #[must_use]
    pub fn on_warning(mut self, sink: impl Fn(&Warning) + 'static) -> Self {
        self.on_warning = Some(Rc::new(sink));
        self
    }

    /// Return the name of the file being loaded, if any.
    #[must_use]
    pub fn get_filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Return whether plain scalars are resolved against implicit types.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.resolve
    }

    /// Return whether characters and tags are validated.
    #[must_use]
    pub fn is_validating(&self) -> bool {
        self.validate
    }

    /// Return whether warnings are turned into errors.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Return whether legacy mode is enabled.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// Return the maximum nesting depth of a document.
    #[must_use]
    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }

    /// Return the maximum length of a mapping key.
    #[must_use]
    pub fn get_max_key_length(&self) -> usize {
        self.max_key_length
    }

    /// Return the handler receiving warnings, if one was set.
    #[must_use]
    pub fn warning_sink(&self) -> Option<&WarningSink> {
        self.on_warning.as_ref()
    }
}
