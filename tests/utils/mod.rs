use anyhow::Result;
use std::process::Command;

use super::common::TestEnvironment;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

pub fn run_nodepm_command(env: &TestEnvironment, args: &[&str]) -> Result<CommandOutput> {
    run_nodepm_command_with_env(env, args, &[])
}

pub fn run_nodepm_command_with_env(
    env: &TestEnvironment,
    args: &[&str],
    vars: &[(&str, &str)],
) -> Result<CommandOutput> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nodepm"));
    cmd.args(args)
        .current_dir(env.project())
        .env("HOME", env.home())
        .env("XDG_CONFIG_HOME", env.config_home())
        .env_remove("NODEPM_PACKAGE_MANAGER");

    for (key, value) in vars {
        cmd.env(key, value);
    }

    let output = cmd.output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Run and return trimmed stdout, failing on a non-zero exit
pub fn stdout_of(env: &TestEnvironment, args: &[&str]) -> Result<String> {
    let output = run_nodepm_command(env, args)?;
    anyhow::ensure!(
        output.exit_code == 0,
        "nodepm {:?} failed: {}",
        args,
        output.stderr
    );
    Ok(output.stdout.trim().to_string())
}
