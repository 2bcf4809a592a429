use std::fs;
use std::path::{Path, PathBuf};

/// Layers that must reach data only through `FeedService`
const SERVICE_ONLY_DIRS: &[&str] = &["src/api/handlers", "src/engine"];

const FORBIDDEN: &[&str] = &[
    ".store.",
    ".store()",
    "DocumentStore",
    "PostgresStore",
    "MemoryStore",
    "sqlx::",
];

fn collect_rust_files(root: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(root) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rust_files(&path, out);
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) == Some("rs") {
            out.push(path);
        }
    }
}

#[test]
fn handlers_and_engine_never_touch_the_store() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut files = Vec::new();
    for dir in SERVICE_ONLY_DIRS {
        collect_rust_files(&repo_root.join(dir), &mut files);
    }
    assert!(!files.is_empty(), "no source files found under {SERVICE_ONLY_DIRS:?}");

    let mut offenders = Vec::new();
    for file in files {
        let rel = file
            .strip_prefix(repo_root)
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        let content = fs::read_to_string(&file).unwrap_or_default();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("//") {
                continue;
            }
            if FORBIDDEN.iter().any(|needle| trimmed.contains(needle)) {
                offenders.push(format!("{rel}:{}: {}", idx + 1, trimmed));
            }
        }
    }

    assert!(
        offenders.is_empty(),
        "store access outside the service layer:\n{}",
        offenders.join("\n")
    );
}

#[test]
fn only_the_postgres_adapter_speaks_sql() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut files = Vec::new();
    collect_rust_files(&repo_root.join("src"), &mut files);

    let offenders: Vec<String> = files
        .iter()
        .filter_map(|file| {
            let rel = file
                .strip_prefix(repo_root)
                .unwrap_or(file)
                .to_string_lossy()
                .replace('\\', "/");
            if rel == "src/adapters/postgres.rs" {
                return None;
            }
            let content = fs::read_to_string(file).unwrap_or_default();
            content.contains("sqlx::query").then_some(rel)
        })
        .collect();

    assert!(
        offenders.is_empty(),
        "raw queries outside the postgres adapter: {offenders:?}"
    );
}
