use crate::generator::EntryGenerator;
use anyhow::Context;
use rand::Rng;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

pub const OUTPUT_FILE: &str = "example.json";
pub const PROGRESS_INTERVAL: u64 = 1_000_000;

const WRITE_BUFFER_SIZE: usize = 1 << 20;

/// Truncates `path` and fills it with `count` generated entries.
pub fn create_log<R: Rng + ?Sized>(path: &Path, count: u64, rng: &mut R) -> anyhow::Result<()> {
    info!(entries = count, "creating log");
    let generator = EntryGenerator::new().context("building level distribution")?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

    write_entries(&mut out, &generator, count, rng)?;
    out.flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!("done");
    Ok(())
}

pub fn write_entries<W, R>(
    out: &mut W,
    generator: &EntryGenerator,
    count: u64,
    rng: &mut R,
) -> anyhow::Result<()>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
{
    for id in 0..count {
        if id % PROGRESS_INTERVAL == 0 {
            info!(entry_number = id, remaining = count - id, "logging");
        }
        let entry = generator.create_entry(rng, id);
        serde_json::to_writer(&mut *out, &entry)
            .with_context(|| format!("writing entry {id}"))?;
        out.write_all(b"\n")
            .with_context(|| format!("writing entry {id}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::Value;
    use std::io;

    fn render(count: u64) -> String {
        let mut rng = StdRng::seed_from_u64(11);
        let generator = EntryGenerator::new().unwrap();
        let mut buffer = Vec::new();
        write_entries(&mut buffer, &generator, count, &mut rng).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn zero_entries_writes_nothing() {
        assert_that!(render(0)).is_empty();
    }

    #[test]
    fn one_json_object_per_line() {
        let output = render(250);
        let lines: Vec<_> = output.lines().collect();
        assert_that!(lines.len()).is_equal_to(250);
        assert_that!(output.ends_with('\n')).is_true();

        for (i, line) in lines.into_iter().enumerate() {
            let value: Value = serde_json::from_str(line).unwrap();
            let object = value.as_object().unwrap();
            let keys: Vec<_> = object.keys().map(String::as_str).collect();
            assert_that!(keys.len()).is_equal_to(6);
            assert_that!(object["id"].as_u64()).is_equal_to(Some(i as u64));
            assert_that!(object["happiness"].as_i64()).is_some();
            assert_that!(object["timestamp"].as_str().unwrap().ends_with('Z')).is_true();
        }
    }

    #[test]
    fn keys_keep_wire_order() {
        let output = render(1);
        let line = output.trim_end();
        let keys = [
            "\"container\"",
            "\"timestamp\"",
            "\"msg\"",
            "\"level\"",
            "\"happiness\"",
            "\"id\"",
        ];
        let positions: Vec<_> = keys.iter().map(|key| line.find(key).unwrap()).collect();
        assert_that!(positions.is_sorted()).is_true();
    }

    #[test]
    fn levels_are_upper_case_names() {
        for line in render(2_000).lines() {
            let value: Value = serde_json::from_str(line).unwrap();
            let level = value["level"].as_str().unwrap().to_string();
            assert_that!(["DEBUG", "INFO", "WARN", "ERROR", "FATAL"].contains(&level.as_str()))
                .is_true();
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported() {
        let mut rng = StdRng::seed_from_u64(0);
        let generator = EntryGenerator::new().unwrap();
        let err = write_entries(&mut BrokenPipe, &generator, 3, &mut rng).unwrap_err();
        assert_that!(err.to_string()).is_equal_to("writing entry 0".to_string());
    }

    #[test]
    fn create_log_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        std::fs::write(&path, "stale\n".repeat(100)).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        create_log(&path, 5, &mut rng).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_that!(contents.lines().count()).is_equal_to(5);
        assert_that!(contents.contains("stale")).is_false();
    }

    #[test]
    fn one_generator_serves_several_batches() {
        let generator = EntryGenerator::new().unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_entries(&mut first, &generator, 10, &mut rng).unwrap();
        write_entries(&mut second, &generator, 20, &mut rng).unwrap();
        assert_that!(first.iter().filter(|b| **b == b'\n').count()).is_equal_to(10);
        assert_that!(second.iter().filter(|b| **b == b'\n').count()).is_equal_to(20);
    }

    #[test]
    fn create_log_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(OUTPUT_FILE);
        let mut rng = StdRng::seed_from_u64(1);
        assert_that!(create_log(&path, 1, &mut rng).is_err()).is_true();
    }
}
