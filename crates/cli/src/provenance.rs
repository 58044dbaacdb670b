//! `<stem>.provenance.json` records written next to every artifact.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::sinks::write_json;

/// Run parameters plus the files an artifact was derived from.
pub struct Payload {
    pub params: Value,
    pub inputs: Vec<PathBuf>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.inputs.push(input.into());
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    tool_version: &'static str,
    callsite: Callsite,
    params: &'a Value,
    inputs: Vec<String>,
    outputs: [String; 1],
}

fn lossy(p: &Path) -> String {
    p.to_string_lossy().into_owned()
}

/// Write the sidecar for `artifact`; the callsite is the caller of this function.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let caller = Location::caller();
    let artifact = artifact.as_ref();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        tool_version: montecarlo::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        params: &payload.params,
        inputs: payload.inputs.iter().map(|p| lossy(p)).collect(),
        outputs: [lossy(artifact)],
    };
    let path = sidecar_path(artifact);
    write_json(&path, &doc)?;
    Ok(path)
}

/// `data/results.csv` → `data/results.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Build-time `GIT_COMMIT`, then runtime `GIT_COMMIT`, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .into_iter()
        .chain(std::env::var("GIT_COMMIT").ok())
        .find(|rev| !rev.is_empty());
    from_env
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/output/Coursework.json")),
            Path::new("/tmp/output/Coursework.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("results.csv")),
            Path::new("results.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_params_inputs_and_callsite() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("means.json");
        fs::write(&artifact, "{}").unwrap();
        let payload = Payload::new(json!({"experiments": 3})).with_input("Coursework.json");
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["experiments"], 3);
        assert_eq!(parsed["inputs"][0], "Coursework.json");
        assert_eq!(parsed["tool_version"], montecarlo::VERSION);
        assert!(parsed["callsite"]["file"]
            .as_str()
            .unwrap()
            .ends_with("provenance.rs"));
        assert!(!parsed["code_rev"].as_str().unwrap().is_empty());
    }
}
