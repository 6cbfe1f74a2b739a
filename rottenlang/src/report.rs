/// Where lexical and syntax errors go. The front end only calls it; display
/// and storage are up to the implementation.
pub trait ErrorReporter {
    fn report_scan_error(&mut self, line: usize, column: usize, snippet: &str, message: &str);
    fn report_syntax_error(&mut self, line: usize, column: usize, location: &str, message: &str);
}

/// Writes every diagnostic to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report_scan_error(&mut self, line: usize, column: usize, snippet: &str, message: &str) {
        eprintln!("[line={} col={}] Error: {}. Snippet: '{}'", line, column, message, snippet);
    }

    fn report_syntax_error(&mut self, line: usize, column: usize, location: &str, message: &str) {
        eprintln!("[line={} col={}] Error {}: {}", line, column, location, message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Scan,
    Syntax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    pub column: usize,
    /// Offending snippet for scan errors, location text for syntax errors.
    pub context: String,
    pub message: String,
}

/// Keeps diagnostics in memory, in the order they were reported.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report_scan_error(&mut self, line: usize, column: usize, snippet: &str, message: &str) {
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::Scan,
            line,
            column,
            context: snippet.to_string(),
            message: message.to_string(),
        });
    }

    fn report_syntax_error(&mut self, line: usize, column: usize, location: &str, message: &str) {
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::Syntax,
            line,
            column,
            context: location.to_string(),
            message: message.to_string(),
        });
    }
}
