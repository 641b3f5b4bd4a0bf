//! Rank output
//!
//! One line per node, `"<URL> <rank>\n"`, highest rank first.

use crate::analysis::Ranking;
use crate::LinkRankError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes the sorted ranking to `writer`
pub fn write_rankings<W: Write>(ranking: &Ranking, writer: &mut W) -> io::Result<()> {
    for (url, score) in ranking.sorted() {
        writeln!(writer, "{} {}", url, score)?;
    }
    Ok(())
}

/// Writes the sorted ranking to a file, replacing any existing file
pub fn save_rankings(ranking: &Ranking, path: &Path) -> Result<(), LinkRankError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_rankings(ranking, &mut writer)?;
    writer.flush()?;

    tracing::info!(
        "Wrote {} ranks to {}",
        ranking.scores.len(),
        path.display()
    );
    Ok(())
}
