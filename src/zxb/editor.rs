use crate::error::{Result, ZxbError};
use crate::shell::Shell;
use std::env;
use std::ffi::OsString;
use std::path::Path;

/// Editor used when `$EDITOR` is not set.
pub const DEFAULT_EDITOR: &str = "code";

/// Gets the editor command from `$EDITOR`, falling back to VS Code.
pub fn get_editor() -> String {
    editor_from(env::var("EDITOR").ok())
}

fn editor_from(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Splits an editor command into program and arguments, appending `path`.
/// VS Code gets `-n` so the file opens in a new window.
pub fn editor_invocation(editor: &str, path: &Path) -> (String, Vec<OsString>) {
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(DEFAULT_EDITOR).to_string();
    let mut args: Vec<OsString> = parts.map(OsString::from).collect();

    if editor == DEFAULT_EDITOR {
        args.push("-n".into());
    }
    args.push(path.as_os_str().to_os_string());
    (program, args)
}

/// Opens a file or directory in the user's editor and waits for it to return.
pub fn open_in_editor<P: AsRef<Path>>(shell: &dyn Shell, path: P) -> Result<()> {
    let path = path.as_ref();
    let editor = get_editor();
    let (program, args) = editor_invocation(&editor, path);

    match shell.run_interactive(&program, &args, None) {
        Ok(Some(0)) => Ok(()),
        _ => Err(ZxbError::Editor {
            editor,
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_editor_when_unset_or_blank() {
        assert_eq!(editor_from(None), "code");
        assert_eq!(editor_from(Some("   ".into())), "code");
        assert_eq!(editor_from(Some("vim".into())), "vim");
    }

    #[test]
    fn test_code_opens_new_window() {
        let (program, args) = editor_invocation("code", Path::new("/tmp/a.mjs"));
        assert_eq!(program, "code");
        assert_eq!(args, vec![OsString::from("-n"), OsString::from("/tmp/a.mjs")]);
    }

    #[test]
    fn test_custom_editor_is_invoked_directly() {
        let (program, args) = editor_invocation("vim", Path::new("/tmp/a.mjs"));
        assert_eq!(program, "vim");
        assert_eq!(args, vec![OsString::from("/tmp/a.mjs")]);
    }

    #[test]
    fn test_editor_with_flags() {
        let path = PathBuf::from("/tmp/a.mjs");
        let (program, args) = editor_invocation("code --wait", &path);
        assert_eq!(program, "code");
        assert_eq!(args, vec![OsString::from("--wait"), OsString::from("/tmp/a.mjs")]);
    }
}
