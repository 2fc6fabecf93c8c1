use crate::error::Error;
use std::path::Path;

/// Parsing knobs for [`read_keys_file`].
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Comment marker; a line starting with it is skipped, and any
    /// trailing occurrence on a line truncates the rest of that line.
    pub comment: String,
    /// Column separator.
    pub splitby: String,
    /// 1-indexed column holding the key.
    pub keycol: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            comment: "#".to_string(),
            splitby: ",".to_string(),
            keycol: 1,
        }
    }
}

/// Reads keys (and implicit, input-order desired hashes) from a plain-text
/// file: one record per line, comments stripped, blank lines ignored.
pub fn read_keys_file(path: &Path, opts: &ReaderOptions) -> Result<Vec<(String, u64)>, Error> {
    let text = std::fs::read_to_string(path)?;
    let path_display = path.display().to_string();

    let mut keys_hashes = Vec::new();
    let mut hashval: i64 = -1;

    for (lineno, raw_line) in text.lines().enumerate() {
        let mut line = raw_line.trim().to_string();
        if line.is_empty() || line.starts_with(opts.comment.as_str()) {
            continue;
        }
        if let Some(pos) = line.find(opts.comment.as_str()) {
            line.truncate(pos);
            line = line.trim_end().to_string();
        }

        let columns: Vec<&str> = line.split(opts.splitby.as_str()).map(str::trim).collect();
        let key = columns.get(opts.keycol.saturating_sub(1)).ok_or_else(|| {
            Error::MalformedInput {
                path: path_display.clone(),
                line: lineno + 1,
            }
        })?;

        hashval += 1;
        keys_hashes.push((key.to_string(), hashval as u64));
    }

    if keys_hashes.is_empty() {
        return Err(Error::MalformedInput {
            path: path_display,
            line: 0,
        });
    }

    Ok(keys_hashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_simple_single_column_file() {
        let f = write_temp("jan\nfeb\nmar\n");
        let rows = read_keys_file(f.path(), &ReaderOptions::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                ("jan".to_string(), 0),
                ("feb".to_string(), 1),
                ("mar".to_string(), 2)
            ]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let f = write_temp("# header\n\njan # first month\nfeb\n");
        let rows = read_keys_file(f.path(), &ReaderOptions::default()).unwrap();
        assert_eq!(rows, vec![("jan".to_string(), 0), ("feb".to_string(), 1)]);
    }

    #[test]
    fn respects_keycol_and_splitby() {
        let f = write_temp("0,jan,January\n1,feb,February\n");
        let opts = ReaderOptions {
            comment: "#".to_string(),
            splitby: ",".to_string(),
            keycol: 2,
        };
        let rows = read_keys_file(f.path(), &opts).unwrap();
        assert_eq!(rows, vec![("jan".to_string(), 0), ("feb".to_string(), 1)]);
    }

    #[test]
    fn missing_column_is_malformed_input() {
        let f = write_temp("jan,January\nfeb\n");
        let opts = ReaderOptions {
            comment: "#".to_string(),
            splitby: ",".to_string(),
            keycol: 2,
        };
        let err = read_keys_file(f.path(), &opts).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { line: 2, .. }));
    }
}
