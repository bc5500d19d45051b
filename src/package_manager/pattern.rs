//! Regex sources that recognize any manager's spelling of an action.

/// Build an uncompiled regex source matching every manager's form of `action`.
///
/// `install` also matches a bare `yarn`. For every other action pnpm and yarn
/// accept both the bare and the `run` form. `action` is escaped, so `test.all`
/// only matches the literal string.
pub fn command_pattern(action: &str) -> String {
    let alternatives: Vec<String> = match action {
        "install" => vec![
            "npm install".to_string(),
            "pnpm install".to_string(),
            "yarn( install)?".to_string(),
            "bun install".to_string(),
        ],
        "test" => vec![
            "npm (run )?test".to_string(),
            "pnpm (run )?test".to_string(),
            "yarn (run )?test".to_string(),
            "bun (run )?test".to_string(),
        ],
        _ => {
            let action = regex::escape(action);
            vec![
                format!("npm run {action}"),
                format!("pnpm (run )?{action}"),
                format!("yarn (run )?{action}"),
                format!("bun run {action}"),
            ]
        }
    };

    format!("({})", alternatives.join("|"))
}
