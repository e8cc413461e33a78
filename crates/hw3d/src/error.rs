pub type MyResult<T, E = MyReport> = core::result::Result<T, E>;

/// Error type returned across the crate.
///
/// Wraps an [`eyre::Report`] so that both eyre errors and raw Win32/Direct3D
/// errors can be propagated with `?`.
pub struct MyReport {
    inner: eyre::Report,
}

impl MyReport {
    pub fn into_report(self) -> eyre::Report {
        self.inner
    }

    pub fn wrap_err(self, message: impl std::fmt::Display + Send + Sync + 'static) -> Self {
        Self {
            inner: self.inner.wrap_err(message),
        }
    }
}

impl From<eyre::Report> for MyReport {
    fn from(report: eyre::Report) -> Self {
        Self { inner: report }
    }
}

impl std::fmt::Display for MyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::fmt::Debug for MyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for MyReport {
    fn from(error: windows::core::Error) -> Self {
        Self {
            inner: eyre::Report::new(WrappedWindowsError::from(error)),
        }
    }
}

/// `windows::core::Error` does not satisfy eyre's bounds on its own, so it is
/// carried inside this newtype.
#[cfg(windows)]
pub struct WrappedWindowsError {
    inner: windows::core::Error,
}

#[cfg(windows)]
impl From<windows::core::Error> for WrappedWindowsError {
    fn from(error: windows::core::Error) -> Self {
        Self { inner: error }
    }
}

#[cfg(windows)]
impl std::error::Error for WrappedWindowsError {}

#[cfg(windows)]
impl std::fmt::Display for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.inner.message(), self.inner.code())
    }
}

#[cfg(windows)]
impl std::fmt::Debug for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails() -> MyResult<()> {
        Err(eyre::eyre!("device lost"))?
    }

    #[test]
    fn eyre_reports_convert_with_question_mark() {
        let err = fails().unwrap_err();
        assert_eq!(err.to_string(), "device lost");
    }

    #[test]
    fn wrap_err_keeps_the_source_in_the_chain() {
        let err = fails().unwrap_err().wrap_err("creating swap chain");
        let report = err.into_report();
        assert_eq!(report.to_string(), "creating swap chain");
        let chain: Vec<String> = report.chain().map(|e| e.to_string()).collect();
        assert_eq!(chain, vec!["creating swap chain", "device lost"]);
    }
}
