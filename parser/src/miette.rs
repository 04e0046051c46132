//! `miette` integration.
//!
//! This module is feature-gated behind the `miette` feature.

use std::{fmt, sync::Arc};

use miette::{Diagnostic, LabeledSpan, NamedSource};

use crate::ScanError;

/// Convert a [`ScanError`] into a `miette::Report`.
///
/// `source` must be the YAML input the error was raised on, and `file` the name it is displayed
/// under.
///
/// # Example
///
/// ```rust,no_run
/// use tessera_parser::{load_with, Options, Schema};
///
/// let yaml = "key: [unterminated\n";
/// let err = load_with(yaml, &Schema::new(), &Options::default()).unwrap_err();
/// let report = tessera_parser::miette::to_miette_report(&err, yaml, "config.yaml");
///
/// // `Debug` formatting uses miette's graphical reporter.
/// eprintln!("{report:?}");
/// ```
#[must_use]
pub fn to_miette_report(err: &ScanError, source: &str, file: &str) -> miette::Report {
    let src = Arc::new(NamedSource::new(file, source.to_owned()));
    let offset = err.marker().index().min(source.len());
    let diagnostic = ErrorDiagnostic {
        message: err.info().to_owned(),
        code: err.kind().to_string(),
        src,
        labels: vec![LabeledSpan::at_offset(offset, err.info().to_owned())],
    };
    miette::Report::new(diagnostic)
}

#[derive(Clone, Debug)]
struct ErrorDiagnostic {
    message: String,
    code: String,
    src: Arc<NamedSource<String>>,
    labels: Vec<LabeledSpan>,
}

impl fmt::Display for ErrorDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorDiagnostic {}

impl Diagnostic for ErrorDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(self.labels.clone().into_iter()))
    }
}
