// ABOUTME: Rewrites single-dash long flags (-action, -issueNumber) into clap's double-dash form
// ABOUTME: Runs on the raw command line before CLI argument parsing

use std::ffi::OsString;

/// Single-dash spellings accepted for compatibility, and the flag each one maps to
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-action", "--action"),
    ("-owner", "--owner"),
    ("-repo", "--repo"),
    ("-issueNumber", "--issue-number"),
    ("-json", "--json"),
    ("-pretty", "--pretty"),
    ("-no-color", "--no-color"),
    ("-verbose", "--verbose"),
];

/// Normalize a full command line (including program name)
///
/// `-action create` and `-action=create` both become `--action ...`. Tokens after a
/// bare `--` are left alone, as are tokens that are not valid UTF-8.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg.to_str() == Some("--") {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        match arg.to_str().and_then(rewrite) {
            Some(modern) => normalized.push(OsString::from(modern)),
            None => normalized.push(arg),
        }
    }

    normalized
}

fn rewrite(arg: &str) -> Option<String> {
    let (name, value) = match arg.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (arg, None),
    };

    let (_, modern) = LEGACY_FLAGS.iter().find(|(legacy, _)| *legacy == name)?;

    Some(match value {
        Some(value) => format!("{}={}", modern, value),
        None => modern.to_string(),
    })
}
