use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};
use true_review_lib::api::{
    analyze_text_detailed, render_explain, render_text, save_defaults, share_summary, to_json_pretty,
    to_json_pretty_explained, ApiError,
};
use true_review_lib::models::{AnalyzeRequest, AnalyzeResponse};
use true_review_lib::services::config_store::ConfigStore;
use true_review_lib::services::detection::RuleHit;
use true_review_lib::services::text_processor::preview;

const USAGE: &str = "Usage:
  trueReview [<file>|-] [--sensitivity <1|2|3|low|medium|high>] [--mode <name>]
             [--json] [--explain] [--out <json_path>] [--save-defaults]

Notes:
  - Reviews are separated by blank lines; each one is scored on its own.
  - Without <file> (or with `-`) the text is read from stdin.
  - Defaults for sensitivity/mode come from config.json (TRUEREVIEW_CONFIG_DIR overrides its location).
  - --save-defaults without <file> on a terminal only saves; pipe text or pass `-` to analyze as well.
  - --json --explain adds the fired rules of each block under \"explain\" in the JSON.";

const VALUE_FLAGS: &[&str] = &["--sensitivity", "--mode", "--out"];

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg == "-" || !arg.starts_with("--") {
            return Some(arg.clone());
        }
    }
    None
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) if p != "-" => std::fs::read_to_string(p).with_context(|| format!("read file failed: {}", p)),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin failed")?;
            Ok(buf)
        }
    }
}

/// Whether to go on to analysis. A bare `--save-defaults` typed at a terminal
/// has nothing to analyze.
fn wants_analysis(save_defaults: bool, input_path: Option<&str>, stdin_is_terminal: bool) -> bool {
    !(save_defaults && input_path.is_none() && stdin_is_terminal)
}

fn report_json(response: &AnalyzeResponse, hits: &[Vec<RuleHit>], explain: bool) -> Result<String, ApiError> {
    if explain {
        to_json_pretty_explained(response, hits)
    } else {
        to_json_pretty(response)
    }
}

/// Everything printed on stdout. With `json` set the output is one JSON document.
fn render_stdout(
    response: &AnalyzeResponse,
    hits: &[Vec<RuleHit>],
    json: bool,
    explain: bool,
    truncation_note: Option<String>,
) -> Result<String, ApiError> {
    if json {
        let mut out = report_json(response, hits, explain)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    if let Some(note) = truncation_note {
        out.push_str(&note);
        out.push_str("\n\n");
    }
    out.push_str(&render_text(&response.report));
    out.push('\n');
    out.push_str(&share_summary(&response.report));
    out.push('\n');
    if explain {
        out.push('\n');
        out.push_str(&render_explain(&response.report, hits));
    }
    Ok(out)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    true_review_lib::init_logging();

    let sensitivity = parse_arg_value(&args, "--sensitivity");
    let mode = parse_arg_value(&args, "--mode");
    let as_json = has_flag(&args, "--json");
    let explain = has_flag(&args, "--explain");
    let out_path = parse_arg_value(&args, "--out");

    let store = ConfigStore::default_config_dir().map(ConfigStore::new);
    let config = store
        .as_ref()
        .map(|s| s.load_or_default())
        .unwrap_or_default();

    let saving_defaults = has_flag(&args, "--save-defaults");
    if saving_defaults {
        let store = store.as_ref().context("no config directory available")?;
        let saved = save_defaults(store, sensitivity.as_deref(), mode.as_deref())?;
        eprintln!(
            "Saved defaults to {}: sensitivity={} mode={}",
            store.config_file().display(),
            saved.analysis.sensitivity,
            saved.analysis.mode
        );
    }

    let input_path = positional(&args);
    if !wants_analysis(saving_defaults, input_path.as_deref(), std::io::stdin().is_terminal()) {
        return Ok(());
    }
    let text = read_input(input_path.as_deref())?;

    let request = AnalyzeRequest { text, sensitivity, mode };
    let (response, hits) = match analyze_text_detailed(&request, &config.analysis) {
        Ok(r) => r,
        Err(ApiError::EmptyInput) => {
            eprintln!("Please paste a review first.\n\n{}", USAGE);
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    let truncation_note = response.truncated.then(|| {
        format!(
            "(input truncated to {} chars: \"{}\")",
            config.analysis.max_input_chars,
            preview(&request.text, 40)
        )
    });
    print!("{}", render_stdout(&response, &hits, as_json, explain, truncation_note)?);

    if let Some(out_path) = out_path {
        let json = report_json(&response, &hits, explain)?;
        std::fs::write(&out_path, json).with_context(|| format!("write out failed: {}", out_path))?;
        eprintln!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
