use std::{collections::BTreeMap, fmt, sync::Arc};

/// Keyed error: a stable `key`, ordered arguments, and a chain of causes.
#[derive(Debug, Clone)]
pub struct ViewerError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<Arc<dyn std::error::Error + Send + Sync>>,
}

impl ViewerError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(Arc::new(cause));
        self
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes
            .first()
            .map(|c| c.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<confy::ConfyError> for ViewerError {
    fn from(err: confy::ConfyError) -> Self {
        ViewerError::new("confy::ConfyError").push_std(err)
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(err: winit::error::EventLoopError) -> Self {
        ViewerError::new("winit::error::EventLoopError").push_std(err)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(err: winit::error::OsError) -> Self {
        ViewerError::new("winit::error::OsError").push_std(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_lists_args_in_order() {
        let err = ViewerError::new("settings-invalid")
            .with_arg("min", 3)
            .with_arg("max", 1);
        assert_eq!(err.to_string(), "settings-invalid(max=1, min=3)");
    }

    #[test]
    fn source_walks_first_cause() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ViewerError::new("outer").push_std(inner);
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("missing"));
    }
}
