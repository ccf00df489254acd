//! Wordlist persistence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use wordforge_types::{Result, WordlistError};

/// Write words one per line.
pub fn write_words<W: Write>(writer: &mut W, words: &[String]) -> std::io::Result<()> {
    for word in words {
        writer.write_all(word.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Save an already sorted wordlist to `path`, returning how many words were
/// written.
///
/// The parent directory must exist. Any I/O failure is fatal for the run.
pub fn save_wordlist(path: impl AsRef<Path>, words: &[String]) -> Result<usize> {
    let path = path.as_ref();
    let persistence = |source: std::io::Error| WordlistError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(persistence)?;
    let mut writer = BufWriter::new(file);
    write_words(&mut writer, words).map_err(persistence)?;

    tracing::info!(
        "A total of {} words have been saved in {}",
        words.len(),
        path.display()
    );

    Ok(words.len())
}
