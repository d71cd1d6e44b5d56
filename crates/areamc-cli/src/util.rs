use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

/// Writes `value` as pretty JSON to the file at `path`, or to stdout when `None`.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_write_json_ends_with_newline() {
        let value = BTreeMap::from([("samples", 10_000)]);
        let mut buf = Vec::new();
        write_json(&mut buf, &value).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"samples\": 10000\n}\n");
    }

    #[test]
    fn test_save_and_read_json_file() {
        let path = std::env::temp_dir().join(format!("areamc-util-{}.json", std::process::id()));
        let value = BTreeMap::from([("hits".to_owned(), 42_u64)]);
        save_json(&value, Some(&path)).unwrap();
        let read: BTreeMap<String, u64> = read_json_file("test", &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read, value);
    }

    #[test]
    fn test_read_missing_file_names_kind() {
        let path = Path::new("/nonexistent/areamc/config.json");
        let err = read_json_file::<BTreeMap<String, u64>>("run config", path).unwrap_err();
        assert!(err.to_string().contains("run config"));
    }
}
