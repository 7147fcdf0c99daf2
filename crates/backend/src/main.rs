use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};

use pwguard_backend::{ClientHints, load_config_from_path};
use pwguard_core::{UserId, now_epoch_seconds};
use pwguard_policy::{PasswordPolicyConfig, UserPasswordState, expiration_status, validate};

const USAGE: &str = "usage: pwguard <check | expired <last-change-epoch> [--impersonated] | hints>";

fn main() -> ExitCode {
    pwguard_observability::init();

    match run(std::env::args().skip(1).collect()) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "pwguard failed");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Vec<String>) -> anyhow::Result<ExitCode> {
    let config = load_config()?;

    match args.first().map(String::as_str) {
        Some("check") => check(&config),
        Some("expired") => expired(&config, &args[1..]),
        Some("hints") => {
            println!("{}", ClientHints::from_config(&config).to_json()?);
            Ok(ExitCode::SUCCESS)
        }
        _ => bail!(USAGE),
    }
}

fn load_config() -> anyhow::Result<PasswordPolicyConfig> {
    match std::env::var_os("PWGUARD_SETTINGS") {
        Some(path) => {
            let path = PathBuf::from(path);
            load_config_from_path(&path)
                .with_context(|| format!("loading settings from {}", path.display()))
        }
        None => {
            tracing::warn!("PWGUARD_SETTINGS not set; using default policy");
            Ok(PasswordPolicyConfig::default())
        }
    }
}

/// Reads the candidate from the first stdin line and the previous password
/// from the optional second line.
fn check(config: &PasswordPolicyConfig) -> anyhow::Result<ExitCode> {
    let mut lines = std::io::stdin().lock().lines();
    let candidate = lines.next().transpose()?.unwrap_or_default();
    let previous = lines.next().transpose()?.unwrap_or_default();

    let result = validate(&candidate, &previous, config);
    println!("{}", serde_json::to_string(&result)?);

    Ok(if result.valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn expired(config: &PasswordPolicyConfig, args: &[String]) -> anyhow::Result<ExitCode> {
    let Some(last_change) = args.first() else {
        bail!(USAGE);
    };
    let last_change: i64 = last_change
        .parse()
        .with_context(|| format!("invalid last-change timestamp '{last_change}'"))?;

    let mut state = UserPasswordState::new(UserId::new(), last_change);
    if args.iter().skip(1).any(|a| a == "--impersonated") {
        state = state.impersonated();
    }

    let status = expiration_status(now_epoch_seconds(), &state, config);
    println!("{}", serde_json::to_string(&status)?);

    Ok(if status.is_expired() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
