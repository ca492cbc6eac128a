/// A successful result that may carry warnings.
///
/// Binding returns this when content was skipped rather than rejected, for
/// example unknown child elements under the default policy.
///
/// ```rust
/// use xmile_bind::types::WithWarnings;
///
/// let bound = WithWarnings::Warning(7, vec!["ignored unknown child <note>".to_string()]);
/// assert!(bound.is_warning());
/// assert_eq!(bound.warnings().len(), 1);
/// assert_eq!(bound.map(|v| v * 2).unwrap(), 14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum WithWarnings<T, W> {
    Ok(T),
    Warning(T, Vec<W>),
}

impl<T, W> WithWarnings<T, W> {
    pub fn is_ok(&self) -> bool {
        matches!(self, WithWarnings::Ok(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, WithWarnings::Warning(_, _))
    }

    pub fn value(&self) -> &T {
        match self {
            WithWarnings::Ok(value) | WithWarnings::Warning(value, _) => value,
        }
    }

    /// The warnings, empty for `Ok`.
    pub fn warnings(&self) -> &[W] {
        match self {
            WithWarnings::Ok(_) => &[],
            WithWarnings::Warning(_, warnings) => warnings,
        }
    }

    /// Extracts the value, discarding any warnings.
    pub fn unwrap(self) -> T {
        match self {
            WithWarnings::Ok(value) | WithWarnings::Warning(value, _) => value,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithWarnings<U, W> {
        match self {
            WithWarnings::Ok(value) => WithWarnings::Ok(f(value)),
            WithWarnings::Warning(value, warnings) => WithWarnings::Warning(f(value), warnings),
        }
    }
}

impl<T, W> From<WithWarnings<T, W>> for (T, Vec<W>) {
    fn from(value: WithWarnings<T, W>) -> Self {
        match value {
            WithWarnings::Ok(value) => (value, Vec::new()),
            WithWarnings::Warning(value, warnings) => (value, warnings),
        }
    }
}
