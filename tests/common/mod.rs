//! Shared fixtures for CLI tests: sample modules and stand-in generators.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const TEMP_PREFIX: &str = "tmp_pdoc_prep_";

/// Generator stand-in that writes `<out>/<stem>.m.html` the way pdoc names its pages.
/// The page links to `<stem>.Foo` and embeds the module source it was given.
const FAKE_PDOC: &str = r##"#!/bin/sh
out=""
mod=""
while [ $# -gt 0 ]; do
  case "$1" in
    --html-dir) out="$2"; shift 2 ;;
    --html-dir=*) out="${1#--html-dir=}"; shift ;;
    *.py) mod="$1"; shift ;;
    *) shift ;;
  esac
done
name=$(basename "$mod" .py)
{
  printf '<h1>Module %s</h1>\n' "$name"
  printf '<a href="#%s.Foo">%s.Foo</a>\n' "$name" "$name"
  printf '<pre>\n'
  cat "$mod"
  printf '</pre>\n'
} > "$out/$name.m.html"
"##;

const FAILING_PDOC: &str = "#!/bin/sh\necho \"ImportError: boom\" >&2\nexit 4\n";

const SILENT_PDOC: &str = "#!/bin/sh\nexit 0\n";

pub const SAMPLE_MODULE: &str = r#"'''
Sample module.

@author: somebody
'''

class Foo:
    def scale(self, factor):
        '''
        Scale the thing.

        @param factor: how much to scale
            by, as a multiple
        @type factor: float
        @return: the scaled value
        @rtype: float
        @raises ValueError: for negative factors
        '''
        return factor
"#;

fn write_script(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write generator script");
    // Run through `sh` so the freshly written file never needs to be executable.
    format!("sh {}", path.display())
}

/// Generator command producing a page for the module it is given.
pub fn fake_generator(dir: &Path) -> String {
    write_script(dir, "fake_pdoc.sh", FAKE_PDOC)
}

/// Generator command that fails with exit code 4.
pub fn failing_generator(dir: &Path) -> String {
    write_script(dir, "failing_pdoc.sh", FAILING_PDOC)
}

/// Generator command that succeeds without producing anything.
pub fn silent_generator(dir: &Path) -> String {
    write_script(dir, "silent_pdoc.sh", SILENT_PDOC)
}

pub fn write_module(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write module");
    path
}

/// Temporary modules left in `dir`, which should always be none after a run.
pub fn leftover_temp_modules(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(TEMP_PREFIX))
        .collect()
}
