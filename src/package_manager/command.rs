//! Rendering install/run/exec command strings for a package manager.
//!
//! Every caller-supplied name passes through [`validate_identifier`] before it
//! is spliced into a command, so the output is safe to hand to a shell.

use super::manager::PackageManager;

/// Characters that are never allowed in any input, reported as unsafe even when
/// they would also fail the allow-list.
const SHELL_METACHARACTERS: &[char] = &[
    ';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r', '\\', '\'', '"', '{', '}', '[', ']',
    '*', '?', '!', '~', '#', '%', '\0',
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{what} must be a non-empty string")]
    EmptyName { what: &'static str },

    #[error("{what} contains unsafe characters: {value:?}")]
    UnsafeCharacters { what: &'static str, value: String },
}

/// What kind of input is being validated; selects the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Script or binary name: letters, digits, `-_.@/`
    Identifier,
    /// Extra arguments: identifier characters plus space, `:`, `=`, `,` and `+`
    Arguments,
}

impl InputKind {
    fn allows(self, c: char) -> bool {
        let identifier = c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '/');
        match self {
            Self::Identifier => identifier,
            Self::Arguments => identifier || matches!(c, ' ' | ':' | '=' | ',' | '+'),
        }
    }
}

/// Check that `value` is non-empty and made only of characters allowed for `kind`.
pub fn validate_input(value: &str, kind: InputKind, what: &'static str) -> Result<(), CommandError> {
    if value.is_empty() {
        return Err(CommandError::EmptyName { what });
    }

    let has_metacharacter = value.contains(SHELL_METACHARACTERS);
    if has_metacharacter || !value.chars().all(|c| kind.allows(c)) {
        return Err(CommandError::UnsafeCharacters {
            what,
            value: value.to_string(),
        });
    }

    Ok(())
}

/// Validate a script or binary name.
pub fn validate_identifier(value: &str, what: &'static str) -> Result<(), CommandError> {
    validate_input(value, InputKind::Identifier, what)
}

/// Render the command that runs `script` under `pm`.
///
/// `install`, `test`, `build` and `dev` use the manager's own idiom; any other
/// name goes through the generic run template.
pub fn run_command(pm: PackageManager, script: &str) -> Result<String, CommandError> {
    validate_identifier(script, "script name")?;

    let d = pm.descriptor();
    let command = match script {
        "install" => d.install_cmd.to_string(),
        "test" => d.test_cmd.to_string(),
        "build" => d.build_cmd.to_string(),
        "dev" => d.dev_cmd.to_string(),
        _ => format!("{} {}", d.run_cmd, script),
    };
    Ok(command)
}

/// Render an ad-hoc binary invocation (`npx`, `pnpm dlx`, `yarn dlx`, `bunx`).
///
/// Empty `args` contribute nothing, not even a trailing space.
pub fn exec_command(
    pm: PackageManager,
    binary: &str,
    args: Option<&str>,
) -> Result<String, CommandError> {
    validate_identifier(binary, "binary name")?;

    let mut command = format!("{} {}", pm.descriptor().exec_cmd, binary);
    if let Some(args) = args.filter(|a| !a.is_empty()) {
        validate_input(args, InputKind::Arguments, "arguments")?;
        command.push(' ');
        command.push_str(args);
    }
    Ok(command)
}
