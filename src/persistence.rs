// File: src/persistence.rs
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::config::PipelineConfig;
use crate::core::categories::CategoryTables;
use crate::error::WordlistResult;
use crate::stats::PipelineReport;

/// Reads a word stream, one entry per line, preserving file order.
///
/// Frequency lists of the form `word<whitespace>count` are accepted: only
/// the first field is kept. Blank lines are skipped; everything else is
/// passed through untouched for the pipeline to judge.
pub fn load_word_stream(path: &Path) -> WordlistResult<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(first) = line.split_whitespace().next() {
            words.push(first.to_string());
        }
    }
    info!(path = %path.display(), words = words.len(), "loaded word stream");
    Ok(words)
}

pub fn load_category_tables(path: &Path) -> WordlistResult<CategoryTables> {
    let json = fs::read_to_string(path)?;
    CategoryTables::from_json(&json)
}

pub fn load_config(path: &Path) -> WordlistResult<PipelineConfig> {
    let json = fs::read_to_string(path)?;
    PipelineConfig::from_json(&json)
}

/// Writes `path` atomically: the content goes to a temp file in the same
/// directory, which is then renamed over the destination.
fn write_atomically<F>(path: &Path, write: F) -> WordlistResult<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> WordlistResult<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path)?;
    Ok(())
}

/// Saves the final list, one lowercase word per line.
pub fn save_wordlist(words: &[String], path: &Path) -> WordlistResult<()> {
    write_atomically(path, |writer| {
        for word in words {
            writeln!(writer, "{}", word)?;
        }
        Ok(())
    })?;
    info!(path = %path.display(), words = words.len(), "saved wordlist");
    Ok(())
}

pub fn save_report(report: &PipelineReport, path: &Path) -> WordlistResult<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)?;
        Ok(())
    })?;
    info!(path = %path.display(), "saved report");
    Ok(())
}
