//! Interactive critique loop: try the persona on typed-in posts without
//! touching the X API.

use std::io::{self, BufRead, Write};

use crate::ai::CritiqueGenerator;

pub const NO_RESPONSE: &str = "(No response received)";

fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("q")
}

/// Read posts from `input` until `q` or end of input, printing a critique
/// for each. Returns the number of posts analysed.
pub async fn run_repl<C, R, W>(critic: &C, mut input: R, output: &mut W) -> io::Result<usize>
where
    C: CritiqueGenerator + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(output, "🧪 Bedrok Local Test Mode")?;
    let mut analysed = 0;

    loop {
        write!(output, "\nEnter a tweet to analyze (or 'q' to quit):\n> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break; // EOF
        }
        if is_quit(&line) {
            break;
        }

        let tweet = line.trim_end_matches(['\r', '\n']);
        let critique = match critic.critique(tweet).await {
            Ok(critique) => Some(critique),
            Err(e) => {
                log::warn!("[AI] {}", e);
                None
            }
        };
        analysed += 1;

        writeln!(output, "\n🧠 Bedrok's critique:")?;
        writeln!(output, "{}", critique.as_deref().unwrap_or(NO_RESPONSE))?;
    }

    Ok(analysed)
}
