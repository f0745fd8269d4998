//! Splits text into words and feeds them to a `WordTable`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use WordTable;

/// Characters that never belong to a word: whitespace, ASCII digits and
/// `, . ! ? " $ % &`.
#[inline]
pub fn is_delimiter(c: char) -> bool {
    match c {
        '0'..='9' | ',' | '.' | '!' | '?' | '"' | '$' | '%' | '&' => true,
        _ => c.is_whitespace(),
    }
}

/// The non-empty words of `text`.
pub fn words<'a>(text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.split(is_delimiter).filter(|word| !word.is_empty())
}

/// Counts every word read from `reader` into a fresh table.
///
/// Delimiters include the line break, so words never span lines.
pub fn count_words<R: BufRead>(reader: R) -> io::Result<WordTable> {
    let mut table = WordTable::new();
    for line in reader.lines() {
        let line = line?;
        table.extend(words(&line));
    }
    Ok(table)
}

pub fn count_file<P: AsRef<Path>>(path: P) -> io::Result<WordTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = count_words(BufReader::new(file))?;
    info!(
        "counted {} distinct words in {} ({} buckets)",
        table.len(),
        path.display(),
        table.bucket_count()
    );
    Ok(table)
}
