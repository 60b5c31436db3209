//! Line-oriented console helpers shared by the teacher and student shells.

use std::io::{self, Write};

/// Read one line from stdin with surrounding whitespace trimmed.
///
/// End of input surfaces as [`io::ErrorKind::UnexpectedEof`]; the top
/// level turns it into a quiet exit.
pub fn read_line() -> io::Result<String> {
    Ok(read_raw_line()?.trim().to_string())
}

/// Read one line keeping leading whitespace. Code lines are
/// indentation-sensitive, so only the trailing newline is stripped.
pub fn read_code_line() -> io::Result<String> {
    let mut line = read_raw_line()?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

fn read_raw_line() -> io::Result<String> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
    }
    Ok(line)
}

/// Print `label: ` and read the answer.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    read_line()
}

/// Ask `label [y/N]`; only an explicit `y` answers true.
pub fn confirm(label: &str) -> io::Result<bool> {
    let answer = prompt(&format!("{label} [y/N]"))?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

/// Read lines until one holding a single `.`, which is discarded.
pub fn read_block(label: &str) -> io::Result<String> {
    println!("{label} (finish with a single '.'):");
    let mut lines = Vec::new();
    loop {
        let line = read_code_line()?;
        if line.trim() == "." {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// Split `input` into a command word and the remaining argument text.
pub fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(' ') {
        Some((head, tail)) => (head, tail.trim()),
        None => (input, ""),
    }
}
