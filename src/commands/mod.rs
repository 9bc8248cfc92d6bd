use std::io::Read;
use std::path::Path;

pub type CmdResult<T> = markswap::Result<(T, i32)>;

pub mod config;
pub mod replace;
pub mod segment;

/// Resolve an inline text argument: `-` reads stdin, `@path` reads a file,
/// anything else is taken verbatim.
pub(crate) fn read_text_arg(field: &str, value: &str) -> markswap::Result<String> {
    if value == "-" {
        if crate::tty::is_stdin_tty() {
            return Err(markswap::Error::validation_invalid_argument(
                field,
                "Cannot read from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(|e| {
            markswap::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = value.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(markswap::Error::validation_invalid_argument(
                field,
                "Invalid value '@' (missing file path)",
                None,
                None,
            ));
        }
        let path = Path::new(path);
        if !path.exists() {
            return Err(markswap::Error::document_not_found(path.display().to_string()));
        }
        return markswap::utils::io::read_file(path, &format!("read {}", path.display()));
    }

    Ok(value.to_string())
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (markswap::Result<serde_json::Value>, i32) {
    crate::tty::status("markswap is working...");

    match command {
        crate::Commands::Replace(args) => dispatch!(args, replace),
        crate::Commands::Segment(args) => dispatch!(args, segment),
        crate::Commands::Config(args) => dispatch!(args, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn plain_values_pass_through() {
        assert_eq!(read_text_arg("title", "Hello").unwrap(), "Hello");
        assert_eq!(read_text_arg("title", "").unwrap(), "");
    }

    #[test]
    fn at_prefix_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("body.html");
        std::fs::write(&path, "<p>from file</p>").unwrap();

        let value = format!("@{}", path.display());
        assert_eq!(read_text_arg("body", &value).unwrap(), "<p>from file</p>");
    }

    #[test]
    fn bare_at_is_invalid() {
        let err = read_text_arg("body", "@").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn at_prefix_with_missing_file_is_not_found() {
        let err = read_text_arg("body", "@/nonexistent/body.html").unwrap_err();
        assert_eq!(err.code.as_str(), "document.not_found");
    }
}
