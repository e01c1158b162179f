use std::io::{self, BufRead, Write};
use tracing::info;

// Rules, applied to each character:
// - ASCII letters swap case
// - digits 1 to 4 become 0
// - digits 5 to 9 become 8
// - everything else, 0 included, is left alone
pub fn remap_char(c: char) -> char {
    match c {
        'a'..='z' => c.to_ascii_uppercase(),
        'A'..='Z' => c.to_ascii_lowercase(),
        '1'..='4' => '0',
        '5'..='9' => '8',
        _ => c,
    }
}

pub fn remap(s: &str) -> String {
    s.chars().map(remap_char).collect()
}

/// Reads one line from `input` and writes `"<line>" -> "<remapped>"`.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<String> {
    let mut bytes = Vec::new();
    input.read_until(b'\n', &mut bytes)?;
    let line = String::from_utf8_lossy(&bytes);
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    let remapped = remap(line);
    writeln!(output, "\"{}\" -> \"{}\"", line, remapped)?;
    output.flush()?;
    info!(len = line.chars().count(), "remapped line");
    Ok(remapped)
}
