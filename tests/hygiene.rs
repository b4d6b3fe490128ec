//! Hygiene: source scans over `src/` that keep the drawing core honest.
//!
//! The painting path runs on every pointer move and must never take the page
//! down, so panicking calls, float casts and slice indexing are held to fixed
//! budgets. Budgets only shrink.

use std::fs;
use std::path::Path;

struct Source {
    path: String,
    lines: Vec<String>,
}

impl Source {
    fn name(&self) -> &str {
        Path::new(&self.path).file_name().and_then(|n| n.to_str()).unwrap_or_default()
    }

    /// Code lines with line numbers, skipping comment lines.
    fn code(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
            .filter(|(_, line)| !line.trim_start().starts_with("//"))
    }
}

/// Production sources: every `src/*.rs` except the sibling `*_test.rs` files.
fn production_sources() -> Vec<Source> {
    let mut sources: Vec<Source> = fs::read_dir("src")
        .map(|entries| entries.flatten().map(|e| e.path()).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "rs"))
        .filter(|p| !p.to_string_lossy().ends_with("_test.rs"))
        .filter_map(|p| {
            let text = fs::read_to_string(&p).ok()?;
            Some(Source { path: p.to_string_lossy().into_owned(), lines: text.lines().map(String::from).collect() })
        })
        .collect();
    sources.sort_by(|a, b| a.path.cmp(&b.path));
    sources
}

/// `path:line` for every code line matching `hit`.
fn find(sources: &[Source], hit: impl Fn(&str) -> bool) -> Vec<String> {
    let hit = &hit;
    sources
        .iter()
        .flat_map(|s| s.code().filter(move |&(_, line)| hit(line)).map(move |(n, _)| format!("{}:{n}", s.path)))
        .collect()
}

fn check(what: &str, hits: &[String], budget: usize) {
    assert!(
        hits.len() <= budget,
        "{what}: {} found, budget {budget}\n  {}",
        hits.len(),
        hits.join("\n  ")
    );
}

/// True if `line` indexes or slices a value: a `[` directly after an
/// identifier, a call or another index.
fn indexes(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes
        .iter()
        .enumerate()
        .skip(1)
        .any(|(i, &b)| b == b'[' && bytes.get(i - 1).is_some_and(|&p| p.is_ascii_alphanumeric() || matches!(p, b'_' | b')' | b']')))
}

fn casts_numeric(line: &str) -> bool {
    const TARGETS: [&str; 12] = ["u8", "u16", "u32", "u64", "usize", "i8", "i16", "i32", "i64", "isize", "f32", "f64"];
    line.split(" as ").skip(1).any(|rest| {
        let ty: String = rest.chars().take_while(|c| c.is_ascii_alphanumeric()).collect();
        TARGETS.contains(&ty.as_str())
    })
}

// =============================================================
// Panics and silent loss
// =============================================================

#[test]
fn no_panicking_calls() {
    let sources = production_sources();
    for needle in [".unwrap()", ".expect(", "panic!(", "unreachable!(", "todo!(", "unimplemented!("] {
        check(needle, &find(&sources, |line| line.contains(needle)), 0);
    }
}

#[test]
fn errors_are_never_discarded() {
    let sources = production_sources();
    for needle in ["let _ =", ".ok()"] {
        check(needle, &find(&sources, |line| line.contains(needle)), 0);
    }
}

#[test]
fn no_dead_code_allowances() {
    let sources = production_sources();
    check("#[allow(dead_code)]", &find(&sources, |line| line.contains("#[allow(dead_code)]")), 0);
}

#[test]
fn output_goes_through_tracing() {
    let sources = production_sources();
    for needle in ["println!(", "eprintln!(", "dbg!(", "console::log"] {
        check(needle, &find(&sources, |line| line.contains(needle)), 0);
    }
}

// =============================================================
// Pixel arithmetic
// =============================================================

#[test]
fn float_to_pixel_casts_go_through_one_helper() {
    let sources = production_sources();
    let stray: Vec<Source> = sources.into_iter().filter(|s| s.name() != "geom.rs").collect();
    check("numeric `as` cast outside geom::pixel_coord", &find(&stray, casts_numeric), 0);
}

#[test]
fn cast_lint_allowances_stay_in_geom() {
    let sources = production_sources();
    let hits = find(&sources, |line| line.contains("clippy::cast_"));
    check("clippy::cast_* allowance", &hits, 1);
    assert!(hits.iter().all(|h| h.starts_with("src/geom.rs") || h.starts_with("src\\geom.rs")), "{hits:?}");
}

#[test]
fn no_slice_indexing() {
    let sources = production_sources();
    check("slice index", &find(&sources, indexes), 0);
}

// =============================================================
// Module boundaries
// =============================================================

#[test]
fn only_render_touches_the_2d_context() {
    let sources = production_sources();
    let outside: Vec<Source> = sources.into_iter().filter(|s| s.name() != "render.rs").collect();
    check("CanvasRenderingContext2d outside render.rs", &find(&outside, |line| line.contains("CanvasRenderingContext2d")), 0);
}

#[test]
fn scanner_sees_the_crate() {
    let sources = production_sources();
    for module in ["engine.rs", "raster.rs", "render.rs", "surface.rs", "transfer.rs"] {
        assert!(sources.iter().any(|s| s.name() == module), "{module} not scanned");
    }
    assert!(indexes("let x = pair[0];"));
    assert!(!indexes("let v = vec![1, 2];"));
    assert!(casts_numeric("let n = x as u32;"));
    assert!(!casts_numeric("use image as img;"));
}
