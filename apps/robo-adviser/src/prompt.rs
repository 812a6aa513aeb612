use std::io::{BufRead, Write};

pub const SYMBOL_PROMPT: &str = "Please input a stock symbol (e.g. 'NFLX'): ";

/// Writes the prompt and reads one line. EOF reads as an empty line.
pub fn read_symbol<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String, String> {
    output
        .write_all(SYMBOL_PROMPT.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|err| format!("failed to write prompt: {err}"))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|err| format!("failed to read symbol: {err}"))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
