// Shared helpers for driving the sqview binary against a fake squeue

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

/// Fields of the built-in configuration, in column order
pub const DEFAULT_FIELDS: &[(&str, &str)] = &[
    ("STATE", "%T"),
    ("NAME", "%j"),
    ("JOBID", "%i"),
    ("TRES_PER_NODE", "%b"),
    ("MIN_CPUS", "%c"),
    ("MIN_MEMORY", "%m"),
    ("RESERVATION", "%v"),
    ("NODELIST(REASON)", "%R"),
];

/// Builds a shell script that answers squeue requests from a fixed script.
/// Requests without a scripted answer print nothing, like squeue does for a
/// job that has left the queue.
pub struct FakeSqueue {
    user: String,
    jobs: Vec<String>,
    responses: Vec<(String, Vec<String>)>,
    failure: Option<String>,
    raw_listing: Option<String>,
}

impl FakeSqueue {
    pub fn new(user: &str) -> Self {
        Self {
            user: user.to_string(),
            jobs: Vec::new(),
            responses: Vec::new(),
            failure: None,
            raw_listing: None,
        }
    }

    pub fn jobs(mut self, jobs: &[&str]) -> Self {
        self.jobs = jobs.iter().map(|j| j.to_string()).collect();
        self
    }

    /// Answer the per-field query for (code, job) with these lines
    pub fn field(mut self, code: &str, job: &str, lines: &[&str]) -> Self {
        let args = format!("-u {} -o {} --job {}", self.user, code, job);
        self.responses
            .push((args, lines.iter().map(|l| l.to_string()).collect()));
        self
    }

    /// Answer every default field for `job`, with `state` as its STATE
    pub fn full_job(mut self, job: &str, state: &str) -> Self {
        for (name, code) in DEFAULT_FIELDS {
            let value = match *name {
                "STATE" => state.to_string(),
                "JOBID" => job.to_string(),
                "NAME" => format!("job {}", job),
                _ => "N/A".to_string(),
            };
            self = self.field(code, job, &[*name, value.as_str()]);
        }
        self
    }

    /// Answer the job listing with a raw printf format, e.g. `\377\n`
    /// for a byte that is not valid UTF-8
    pub fn raw_listing(mut self, printf_format: &str) -> Self {
        self.raw_listing = Some(printf_format.to_string());
        self
    }

    /// Make every invocation exit 1 with this message on stderr
    pub fn failing(mut self, stderr: &str) -> Self {
        self.failure = Some(stderr.to_string());
        self
    }

    fn script(&self) -> String {
        let mut script = String::from("#!/bin/sh\n");
        if let Some(stderr) = &self.failure {
            script.push_str(&format!("echo {} >&2\nexit 1\n", quote(stderr)));
            return script;
        }

        script.push_str("case \"$*\" in\n");
        script.push_str(&format!("  \"-u {} -h -o %A\")\n", self.user));
        match &self.raw_listing {
            Some(format) => script.push_str(&format!("    printf {}\n", quote(format))),
            None => script.push_str(&printf_lines(&self.jobs)),
        }
        script.push_str("    ;;\n");
        for (args, lines) in &self.responses {
            script.push_str(&format!("  \"{}\")\n", args));
            script.push_str(&printf_lines(lines));
            script.push_str("    ;;\n");
        }
        script.push_str("  *)\n    ;;\nesac\n");
        script
    }

    /// Write the script as `squeue` into a fresh directory
    pub fn install(&self) -> TempDir {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("squeue");
        fs::write(&path, self.script()).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        dir
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "'\\''"))
}

fn printf_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        return "    :\n".to_string();
    }
    let quoted: Vec<String> = lines.iter().map(|l| quote(l)).collect();
    format!("    printf '%s\\n' {}\n", quoted.join(" "))
}

/// sqview with the fake squeue first on PATH and USER set
pub fn sqview_cmd(bin_dir: &TempDir, user: &str) -> Command {
    let path = format!(
        "{}:{}",
        bin_dir.path().display(),
        std::env::var("PATH").unwrap_or_default()
    );
    let mut cmd = Command::cargo_bin("sqview").unwrap();
    cmd.env("PATH", path).env("USER", user).env_remove("RUST_LOG");
    cmd
}

pub fn strip_ansi(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Stdout of a successful run, split into lines with colors removed
pub fn plain_lines(stdout: &[u8]) -> Vec<String> {
    let text = String::from_utf8(stdout.to_vec()).unwrap();
    text.lines().map(strip_ansi).collect()
}
